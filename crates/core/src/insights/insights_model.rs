//! Dashboard insights payload.

use serde::{Deserialize, Serialize};

/// One row of a status or priority breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPercentage {
    pub category: String,
    pub count: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalInsights {
    pub total_goals: i64,
    pub goal_status_counts: Vec<CountPercentage>,
    pub goal_priority_counts: Vec<CountPercentage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInsights {
    pub total_tasks: i64,
    pub individual_tasks_count: i64,
    pub individual_tasks_percentage: i64,
    pub individual_task_status_counts: Vec<CountPercentage>,
    pub individual_task_priority_counts: Vec<CountPercentage>,
    pub goal_related_tasks_count: i64,
    pub goal_related_tasks_percentage: i64,
    pub goal_related_task_status_counts: Vec<CountPercentage>,
    pub goal_related_task_priority_counts: Vec<CountPercentage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardInsights {
    pub goal_insights: GoalInsights,
    pub task_insights: TaskInsights,
}

/// Share of `count` in `total` as a whole percent, rounded half up.
///
/// Zero when either operand is zero.
pub fn calculate_percentage(count: i64, total: i64) -> i64 {
    if count == 0 || total == 0 {
        return 0;
    }
    (count * 100 + total / 2) / total
}
