use crate::enums::{Priority, Status};
use crate::errors::Result;
use crate::tasks::tasks_model::{NewTask, Task, TaskFilter};
use async_trait::async_trait;

/// Trait for task repository operations.
///
/// Every query implicitly conjoins `is_active = true`.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    /// Active task with the given id owned by `user_id`.
    fn find_task(&self, task_id: &str, user_id: &str) -> Result<Option<Task>>;
    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
    fn count_tasks(&self, filter: &TaskFilter) -> Result<i64>;
    fn count_tasks_by_status(&self, filter: &TaskFilter) -> Result<Vec<(Status, i64)>>;
    fn count_tasks_by_priority(&self, filter: &TaskFilter) -> Result<Vec<(Priority, i64)>>;
    /// Inserts the whole batch in one transaction.
    async fn create_tasks(&self, tasks: Vec<Task>) -> Result<usize>;
    async fn update_task(&self, task: Task) -> Result<Task>;
    async fn deactivate_task(&self, task_id: &str, actor_id: &str) -> Result<usize>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    /// Active `Independent` tasks of the user.
    fn get_individual_tasks(&self, user_id: &str) -> Result<Vec<Task>>;
    async fn create_tasks(&self, tasks: Vec<NewTask>, user_id: &str) -> Result<usize>;
    async fn update_task(&self, task_id: &str, task: NewTask, user_id: &str) -> Result<Task>;
    async fn delete_task(&self, task_id: &str, user_id: &str) -> Result<()>;
}
