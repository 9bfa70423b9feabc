//! Database models for tasks.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_stored;
use workwise_core::tasks::Task;

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::task)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskDB {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub status: String,
    pub priority: String,
    pub task_type: String,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub created_by: String,
    pub updated_by: String,
    pub is_active: bool,
}

/// Editable columns of a task.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::task)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetDB {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub status: String,
    pub priority: String,
    pub date_updated: NaiveDateTime,
    pub updated_by: String,
}

impl TaskDB {
    /// New active row owned and created by the task's user.
    pub fn from_domain(task: Task, now: NaiveDateTime) -> Self {
        Self {
            created_by: task.user_id.clone(),
            updated_by: task.user_id.clone(),
            id: task.id,
            user_id: task.user_id,
            goal_id: task.goal_id,
            title: task.title,
            description: task.description,
            start_date: task.start_date,
            end_date: task.end_date,
            due_date: task.due_date,
            status: task.status.to_string(),
            priority: task.priority.to_string(),
            task_type: task.task_type.to_string(),
            date_created: now,
            date_updated: now,
            is_active: true,
        }
    }
}

impl TaskChangesetDB {
    pub fn from_domain(task: Task, actor_id: &str, now: NaiveDateTime) -> Self {
        Self {
            title: task.title,
            description: task.description,
            start_date: task.start_date,
            end_date: task.end_date,
            due_date: task.due_date,
            status: task.status.to_string(),
            priority: task.priority.to_string(),
            date_updated: now,
            updated_by: actor_id.to_string(),
        }
    }
}

impl TryFrom<TaskDB> for Task {
    type Error = StorageError;

    fn try_from(db: TaskDB) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_stored("task.status", &db.status)?,
            priority: parse_stored("task.priority", &db.priority)?,
            task_type: parse_stored("task.task_type", &db.task_type)?,
            id: db.id,
            user_id: db.user_id,
            goal_id: db.goal_id,
            title: db.title,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            due_date: db.due_date,
        })
    }
}
