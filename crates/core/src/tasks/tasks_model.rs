//! Tasks domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, Status, TaskType};
use crate::errors::{Result, ValidationError};

/// Domain model representing a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub due_date: Option<NaiveDateTime>,
    pub status: Status,
    pub priority: Priority,
    pub task_type: TaskType,
}

/// Input model for creating or editing a task.
///
/// The task type is never taken from input; it follows the goal link.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewTask {
    #[serde(default)]
    pub goal_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        Ok(())
    }

    /// Builds a persisted task owned by `user_id`.
    ///
    /// When `goal_id` is given the task is linked to that goal and typed
    /// `GoalRelated`; otherwise the type follows the input's own goal link.
    pub fn into_task(self, user_id: &str, goal_id: Option<&str>) -> Task {
        let goal_id = goal_id.map(str::to_string).or(self.goal_id);
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            task_type: TaskType::for_goal(goal_id.as_deref()),
            goal_id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            due_date: self.due_date,
            status: self.status,
            priority: self.priority,
        }
    }
}

/// Conditions for task queries. Only active tasks are ever matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub user_id: Option<String>,
    pub goal_id: Option<String>,
    pub task_type: Option<TaskType>,
    pub status: Option<Status>,
}

impl TaskFilter {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_goal(mut self, goal_id: &str) -> Self {
        self.goal_id = Some(goal_id.to_string());
        self
    }

    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether `task` satisfies every set condition.
    pub fn matches(&self, task: &Task) -> bool {
        self.user_id.as_ref().map_or(true, |u| &task.user_id == u)
            && self
                .goal_id
                .as_ref()
                .map_or(true, |g| task.goal_id.as_ref() == Some(g))
            && self.task_type.map_or(true, |t| task.task_type == t)
            && self.status.map_or(true, |s| task.status == s)
    }
}
