use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;

use workwise_core::goals::{Goal, GoalFilter, GoalRepositoryTrait};
use workwise_core::tasks::Task;
use workwise_core::{Priority, Result, Status};

use super::model::{GoalChangesetDB, GoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goal, task};
use crate::tasks::insert_tasks;
use crate::utils::parse_counts;

fn filtered(filter: &GoalFilter) -> goal::BoxedQuery<'static, Sqlite> {
    let mut query = goal::table.filter(goal::is_active.eq(true)).into_boxed();
    if let Some(user_id) = &filter.user_id {
        query = query.filter(goal::user_id.eq(user_id.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(goal::status.eq(status.as_str()));
    }
    query
}

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn find_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = filtered(&GoalFilter::for_user(user_id))
            .filter(goal::id.eq(goal_id.to_string()))
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| Goal::try_from(r).map_err(Into::into))
            .transpose()
    }

    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(&GoalFilter::for_user(user_id))
            .order(goal::date_created.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Goal::try_from(row).map_err(Into::into))
            .collect()
    }

    fn count_goals(&self, filter: &GoalFilter) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        filtered(filter)
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn count_goals_by_status(&self, filter: &GoalFilter) -> Result<Vec<(Status, i64)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(filter)
            .group_by(goal::status)
            .select((goal::status, sql::<BigInt>("COUNT(*)")))
            .load::<(String, i64)>(&mut conn)
            .into_core()?;
        Ok(parse_counts("goal.status", rows)?)
    }

    fn count_goals_by_priority(&self, filter: &GoalFilter) -> Result<Vec<(Priority, i64)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = filtered(filter)
            .group_by(goal::priority)
            .select((goal::priority, sql::<BigInt>("COUNT(*)")))
            .load::<(String, i64)>(&mut conn)
            .into_core()?;
        Ok(parse_counts("goal.priority", rows)?)
    }

    async fn create_goal_with_tasks(&self, new_goal: Goal, tasks: Vec<Task>) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = GoalDB::from_domain(new_goal, Utc::now().naive_utc());
                let inserted = diesel::insert_into(goal::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                let task_count = insert_tasks(conn, tasks)?;
                debug!("Inserted goal {} with {} tasks", inserted.id, task_count);
                Goal::try_from(inserted).map_err(Into::into)
            })
            .await
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_id = goal_update.id.clone();
                let changes = GoalChangesetDB::from_domain(goal_update, Utc::now().naive_utc());
                let updated = diesel::update(
                    goal::table
                        .filter(goal::id.eq(&goal_id))
                        .filter(goal::is_active.eq(true)),
                )
                .set(&changes)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .into_core()?;
                Goal::try_from(updated).map_err(Into::into)
            })
            .await
    }

    async fn deactivate_goal(&self, goal_id: &str, actor_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        let actor_id = actor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                diesel::update(
                    goal::table
                        .filter(goal::id.eq(&goal_id))
                        .filter(goal::is_active.eq(true)),
                )
                .set((
                    goal::is_active.eq(false),
                    goal::date_updated.eq(now),
                    goal::updated_by.eq(&actor_id),
                ))
                .execute(conn)
                .into_core()?;

                // Linked tasks go with the goal whoever owns them.
                diesel::update(
                    task::table
                        .filter(task::goal_id.eq(&goal_id))
                        .filter(task::is_active.eq(true)),
                )
                .set((
                    task::is_active.eq(false),
                    task::date_updated.eq(now),
                    task::updated_by.eq(&actor_id),
                ))
                .execute(conn)
                .into_core()
            })
            .await
    }
}
