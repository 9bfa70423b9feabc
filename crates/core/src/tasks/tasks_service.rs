use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};

use crate::enums::TaskType;
use crate::errors::{Error, Result};
use crate::goals::GoalRepositoryTrait;
use crate::tasks::tasks_model::{NewTask, Task, TaskFilter};
use crate::tasks::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};

pub struct TaskService {
    task_repo: Arc<dyn TaskRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl TaskService {
    pub fn new(
        task_repo: Arc<dyn TaskRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        TaskService {
            task_repo,
            goal_repo,
        }
    }

    fn find_owned_task(&self, task_id: &str, user_id: &str) -> Result<Task> {
        self.task_repo.find_task(task_id, user_id)?.ok_or_else(|| {
            error!("Task {} not found for user {}", task_id, user_id);
            Error::not_found("Task not found", "Task not found for the given Id")
        })
    }

    /// A goal link must point at an active goal of the same user.
    fn check_goal_link(&self, goal_id: Option<&str>, user_id: &str) -> Result<()> {
        if let Some(goal_id) = goal_id {
            if self.goal_repo.find_goal(goal_id, user_id)?.is_none() {
                error!("Goal {} not found for user {}", goal_id, user_id);
                return Err(Error::not_found(
                    "Goal not found.",
                    "Goal not found for the given ID.",
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    fn get_individual_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        debug!("Getting individual tasks for user {}", user_id);
        self.task_repo
            .list_tasks(&TaskFilter::for_user(user_id).with_task_type(TaskType::Independent))
    }

    async fn create_tasks(&self, tasks: Vec<NewTask>, user_id: &str) -> Result<usize> {
        debug!("Creating {} tasks for user {}", tasks.len(), user_id);
        let mut records = Vec::with_capacity(tasks.len());
        for task in tasks {
            task.validate()?;
            self.check_goal_link(task.goal_id.as_deref(), user_id)?;
            records.push(task.into_task(user_id, None));
        }
        let created = self.task_repo.create_tasks(records).await?;
        debug!("Created {} tasks for user {}", created, user_id);
        Ok(created)
    }

    /// Overwrites the editable fields. The goal link and task type are kept.
    async fn update_task(&self, task_id: &str, task: NewTask, user_id: &str) -> Result<Task> {
        debug!("Updating task {}", task_id);
        task.validate()?;
        let mut existing = self.find_owned_task(task_id, user_id)?;

        existing.title = task.title;
        existing.description = task.description;
        existing.start_date = task.start_date;
        existing.end_date = task.end_date;
        existing.due_date = task.due_date;
        existing.status = task.status;
        existing.priority = task.priority;

        self.task_repo.update_task(existing).await
    }

    async fn delete_task(&self, task_id: &str, user_id: &str) -> Result<()> {
        debug!("Deleting task {}", task_id);
        let task = self.find_owned_task(task_id, user_id)?;
        self.task_repo.deactivate_task(&task.id, user_id).await?;
        Ok(())
    }
}
