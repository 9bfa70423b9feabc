use crate::enums::{Priority, Status};
use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalFilter, NewGoal};
use crate::tasks::Task;
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// Every query implicitly conjoins `is_active = true`.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Active goal with the given id owned by `user_id`.
    fn find_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>>;
    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn count_goals(&self, filter: &GoalFilter) -> Result<i64>;
    fn count_goals_by_status(&self, filter: &GoalFilter) -> Result<Vec<(Status, i64)>>;
    fn count_goals_by_priority(&self, filter: &GoalFilter) -> Result<Vec<(Priority, i64)>>;
    /// Persists the goal and its tasks in one transaction; neither is kept if
    /// either insert fails.
    async fn create_goal_with_tasks(&self, goal: Goal, tasks: Vec<Task>) -> Result<Goal>;
    async fn update_goal(&self, goal: Goal) -> Result<Goal>;
    /// Deactivates the goal and every active task linked to it. Returns the
    /// number of tasks deactivated.
    async fn deactivate_goal(&self, goal_id: &str, actor_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_all_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal_by_id(&self, goal_id: &str, user_id: &str) -> Result<Goal>;
    /// Returns the new goal's id.
    async fn create_goal(&self, new_goal: NewGoal, user_id: &str) -> Result<String>;
    async fn update_goal(&self, goal_id: &str, goal: NewGoal, user_id: &str) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str, user_id: &str) -> Result<()>;
}
