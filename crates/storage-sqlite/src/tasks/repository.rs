use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;

use workwise_core::tasks::{Task, TaskFilter, TaskRepositoryTrait};
use workwise_core::{Priority, Result, Status};

use super::model::{TaskChangesetDB, TaskDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::task;
use crate::utils::{chunk_for_insert, parse_counts};

/// Active tasks matching every condition set on `filter`.
fn filtered(filter: &TaskFilter) -> task::BoxedQuery<'static, Sqlite> {
    let mut query = task::table.filter(task::is_active.eq(true)).into_boxed();
    if let Some(user_id) = &filter.user_id {
        query = query.filter(task::user_id.eq(user_id.clone()));
    }
    if let Some(goal_id) = &filter.goal_id {
        query = query.filter(task::goal_id.eq(goal_id.clone()));
    }
    if let Some(task_type) = filter.task_type {
        query = query.filter(task::task_type.eq(task_type.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(task::status.eq(status.as_str()));
    }
    query
}

/// Inserts tasks in chunks on an open connection.
pub(crate) fn insert_tasks(conn: &mut SqliteConnection, tasks: Vec<Task>) -> Result<usize> {
    let now = Utc::now().naive_utc();
    let rows: Vec<TaskDB> = tasks
        .into_iter()
        .map(|t| TaskDB::from_domain(t, now))
        .collect();
    let mut inserted = 0;
    for chunk in chunk_for_insert(&rows) {
        inserted += diesel::insert_into(task::table)
            .values(chunk)
            .execute(conn)
            .into_core()?;
    }
    Ok(inserted)
}

pub struct TaskRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(filter)
            .order(task::date_created.asc())
            .select(TaskDB::as_select())
            .load::<TaskDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Task::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn find_task(&self, task_id: &str, user_id: &str) -> Result<Option<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let row = filtered(&TaskFilter::for_user(user_id))
            .filter(task::id.eq(task_id.to_string()))
            .select(TaskDB::as_select())
            .first::<TaskDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| Task::try_from(r).map_err(Into::into))
            .transpose()
    }

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.load(filter)
    }

    fn count_tasks(&self, filter: &TaskFilter) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        filtered(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn count_tasks_by_status(&self, filter: &TaskFilter) -> Result<Vec<(Status, i64)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(filter)
            .group_by(task::status)
            .select((task::status, sql::<BigInt>("COUNT(*)")))
            .load::<(String, i64)>(&mut conn)
            .into_core()?;
        Ok(parse_counts("task.status", rows)?)
    }

    fn count_tasks_by_priority(&self, filter: &TaskFilter) -> Result<Vec<(Priority, i64)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(filter)
            .group_by(task::priority)
            .select((task::priority, sql::<BigInt>("COUNT(*)")))
            .load::<(String, i64)>(&mut conn)
            .into_core()?;
        Ok(parse_counts("task.priority", rows)?)
    }

    async fn create_tasks(&self, tasks: Vec<Task>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> { insert_tasks(conn, tasks) })
            .await
    }

    async fn update_task(&self, updated: Task) -> Result<Task> {
        let actor_id = updated.user_id.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let task_id = updated.id.clone();
                let changes =
                    TaskChangesetDB::from_domain(updated, &actor_id, Utc::now().naive_utc());
                diesel::update(
                    task::table
                        .filter(task::id.eq(&task_id))
                        .filter(task::is_active.eq(true)),
                )
                .set(&changes)
                .execute(conn)
                .into_core()?;

                let row = task::table
                    .find(&task_id)
                    .select(TaskDB::as_select())
                    .first::<TaskDB>(conn)
                    .into_core()?;
                Task::try_from(row).map_err(Into::into)
            })
            .await
    }

    async fn deactivate_task(&self, task_id: &str, actor_id: &str) -> Result<usize> {
        let task_id = task_id.to_string();
        let actor_id = actor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    task::table
                        .filter(task::id.eq(task_id))
                        .filter(task::is_active.eq(true)),
                )
                .set((
                    task::is_active.eq(false),
                    task::date_updated.eq(Utc::now().naive_utc()),
                    task::updated_by.eq(actor_id),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
