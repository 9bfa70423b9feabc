use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::enums::Status;
use crate::errors::{Error, Result};
use crate::goals::goals_model::{compute_progress, Goal, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::tasks::{Task, TaskFilter, TaskRepositoryTrait};

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    task_repo: Arc<dyn TaskRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        task_repo: Arc<dyn TaskRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            task_repo,
        }
    }

    fn find_owned_goal(&self, goal_id: &str, user_id: &str) -> Result<Goal> {
        self.goal_repo.find_goal(goal_id, user_id)?.ok_or_else(|| {
            error!("Goal with ID {} not found for user {}", goal_id, user_id);
            Error::not_found("Goal not found.", "Goal not found for the given ID.")
        })
    }

    /// Joins in the goal's active tasks and derives progress from them.
    fn with_tasks(&self, mut goal: Goal) -> Result<Goal> {
        let tasks: Vec<Task> = self
            .task_repo
            .list_tasks(&TaskFilter::for_user(&goal.user_id).with_goal(&goal.id))?;
        let completed = tasks
            .iter()
            .filter(|t| t.status == Status::Completed)
            .count();
        goal.progress = compute_progress(completed, tasks.len());
        goal.task_list = tasks;
        Ok(goal)
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_all_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo
            .list_goals(user_id)?
            .into_iter()
            .map(|goal| self.with_tasks(goal))
            .collect()
    }

    fn get_goal_by_id(&self, goal_id: &str, user_id: &str) -> Result<Goal> {
        let goal = self.find_owned_goal(goal_id, user_id)?;
        self.with_tasks(goal)
    }

    async fn create_goal(&self, new_goal: NewGoal, user_id: &str) -> Result<String> {
        info!("Creating goal with the given details");
        new_goal.validate()?;

        let goal = Goal {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: new_goal.title,
            description: new_goal.description,
            start_date: new_goal.start_date,
            end_date: new_goal.end_date,
            status: new_goal.status,
            priority: new_goal.priority,
            progress: new_goal.progress,
            task_list: Vec::new(),
        };
        let tasks: Vec<Task> = new_goal
            .task_list
            .unwrap_or_default()
            .into_iter()
            .map(|task| task.into_task(user_id, Some(&goal.id)))
            .collect();

        let created = self.goal_repo.create_goal_with_tasks(goal, tasks).await?;
        Ok(created.id)
    }

    async fn update_goal(&self, goal_id: &str, goal: NewGoal, user_id: &str) -> Result<Goal> {
        info!("Updating Goal with Id: {}", goal_id);
        goal.validate()?;
        let mut existing = self.find_owned_goal(goal_id, user_id)?;

        existing.title = goal.title;
        existing.description = goal.description;
        existing.start_date = goal.start_date;
        existing.end_date = goal.end_date;
        existing.status = goal.status;
        existing.priority = goal.priority;

        let updated = self.goal_repo.update_goal(existing).await?;
        self.with_tasks(updated)
    }

    async fn delete_goal(&self, goal_id: &str, user_id: &str) -> Result<()> {
        info!("Deleting Goal with Id: {}", goal_id);
        let goal = self.find_owned_goal(goal_id, user_id)?;
        let deactivated = self.goal_repo.deactivate_goal(&goal.id, user_id).await?;
        info!(
            "Goal {} deleted along with {} linked tasks",
            goal_id, deactivated
        );
        Ok(())
    }
}
