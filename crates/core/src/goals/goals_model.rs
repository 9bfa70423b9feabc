//! Goals domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, Status};
use crate::errors::{Result, ValidationError};
use crate::tasks::{NewTask, Task};

/// Decimal places kept for derived goal progress.
pub const PROGRESS_SCALE: u32 = 2;

/// Domain model representing a goal.
///
/// `task_list` is empty when loaded straight from storage; the goal service
/// fills it with the goal's active tasks and recomputes `progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: Status,
    pub priority: Priority,
    pub progress: Decimal,
    #[serde(default)]
    pub task_list: Vec<Task>,
}

/// Input model for creating a goal (with its initial tasks) or editing one
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub progress: Decimal,
    #[serde(default)]
    pub task_list: Option<Vec<NewTask>>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if let Some(tasks) = &self.task_list {
            for task in tasks {
                task.validate()?;
            }
        }
        Ok(())
    }
}

/// Conditions for goal counts. Only active goals are ever matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalFilter {
    pub user_id: Option<String>,
    pub status: Option<Status>,
}

impl GoalFilter {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, goal: &Goal) -> bool {
        self.user_id.as_ref().map_or(true, |u| &goal.user_id == u)
            && self.status.map_or(true, |s| goal.status == s)
    }
}

/// Completion ratio of a goal's tasks as a percentage.
///
/// Returns zero when the goal has no tasks.
pub fn compute_progress(completed: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(completed) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp(PROGRESS_SCALE)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_progress_without_tasks_is_zero() {
        assert_eq!(compute_progress(0, 0), Decimal::ZERO);
    }

    #[test]
    fn test_progress_is_exact_for_quarters() {
        assert_eq!(compute_progress(1, 4), dec!(25));
        assert_eq!(compute_progress(1, 4).to_string(), "25");
        assert_eq!(compute_progress(4, 4), dec!(100));
    }

    #[test]
    fn test_progress_keeps_two_decimals() {
        assert_eq!(compute_progress(1, 3), dec!(33.33));
        assert_eq!(compute_progress(2, 3), dec!(66.67));
    }

    #[test]
    fn test_new_goal_requires_title() {
        let goal = NewGoal {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert!(goal.validate().is_err());
    }
}
