//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_stored;
use workwise_core::goals::Goal;

/// Database model for goals
#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goal)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: String,
    pub priority: String,
    pub progress: String,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub created_by: String,
    pub updated_by: String,
    pub is_active: bool,
}

/// Columns overwritten by a goal edit.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goal)]
#[diesel(treat_none_as_null = true)]
pub struct GoalChangesetDB {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: String,
    pub priority: String,
    pub date_updated: NaiveDateTime,
    pub updated_by: String,
}

impl GoalDB {
    pub fn from_domain(goal: Goal, now: NaiveDateTime) -> Self {
        Self {
            created_by: goal.user_id.clone(),
            updated_by: goal.user_id.clone(),
            id: goal.id,
            user_id: goal.user_id,
            title: goal.title,
            description: goal.description,
            start_date: goal.start_date,
            end_date: goal.end_date,
            status: goal.status.to_string(),
            priority: goal.priority.to_string(),
            progress: goal.progress.to_string(),
            date_created: now,
            date_updated: now,
            is_active: true,
        }
    }
}

impl GoalChangesetDB {
    pub fn from_domain(goal: Goal, now: NaiveDateTime) -> Self {
        Self {
            updated_by: goal.user_id,
            title: goal.title,
            description: goal.description,
            start_date: goal.start_date,
            end_date: goal.end_date,
            status: goal.status.to_string(),
            priority: goal.priority.to_string(),
            date_updated: now,
        }
    }
}

// Conversion to domain models. The task list is filled in by the service.
impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_stored("goal.status", &db.status)?,
            priority: parse_stored("goal.priority", &db.priority)?,
            progress: parse_stored("goal.progress", &db.progress)?,
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            task_list: Vec::new(),
        })
    }
}
