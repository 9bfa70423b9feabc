use std::sync::Arc;

use log::debug;

use crate::enums::{Priority, Status, TaskType};
use crate::errors::Result;
use crate::goals::{GoalFilter, GoalRepositoryTrait};
use crate::insights::insights_model::{
    calculate_percentage, CountPercentage, DashboardInsights, GoalInsights, TaskInsights,
};
use crate::insights::insights_traits::InsightsServiceTrait;
use crate::tasks::{TaskFilter, TaskRepositoryTrait};

/// Categories that appear in every breakdown, absent or not.
trait BreakdownCategory: Copy + PartialEq + 'static {
    const MEMBERS: &'static [Self];
    fn label(&self) -> &'static str;
}

impl BreakdownCategory for Status {
    const MEMBERS: &'static [Self] = &Status::ALL;
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl BreakdownCategory for Priority {
    const MEMBERS: &'static [Self] = &Priority::ALL;
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

/// Expands grouped counts into a dense breakdown in declaration order.
fn breakdown<C: BreakdownCategory>(grouped: &[(C, i64)], total: i64) -> Vec<CountPercentage> {
    C::MEMBERS
        .iter()
        .map(|member| {
            let count = grouped
                .iter()
                .filter(|(category, _)| category == member)
                .map(|(_, count)| *count)
                .sum();
            CountPercentage {
                category: member.label().to_string(),
                count,
                percentage: calculate_percentage(count, total),
            }
        })
        .collect()
}

pub struct InsightsService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    task_repo: Arc<dyn TaskRepositoryTrait>,
}

impl InsightsService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        task_repo: Arc<dyn TaskRepositoryTrait>,
    ) -> Self {
        Self {
            goal_repo,
            task_repo,
        }
    }

    fn goal_insights(&self, user_id: &str) -> Result<GoalInsights> {
        let filter = GoalFilter::for_user(user_id);
        let total_goals = self.goal_repo.count_goals(&filter)?;
        let by_status = self.goal_repo.count_goals_by_status(&filter)?;
        let by_priority = self.goal_repo.count_goals_by_priority(&filter)?;

        Ok(GoalInsights {
            total_goals,
            goal_status_counts: breakdown(&by_status, total_goals),
            goal_priority_counts: breakdown(&by_priority, total_goals),
        })
    }

    fn task_subset(
        &self,
        user_id: &str,
        task_type: TaskType,
    ) -> Result<(i64, Vec<CountPercentage>, Vec<CountPercentage>)> {
        let filter = TaskFilter::for_user(user_id).with_task_type(task_type);
        let count = self.task_repo.count_tasks(&filter)?;
        let by_status = self.task_repo.count_tasks_by_status(&filter)?;
        let by_priority = self.task_repo.count_tasks_by_priority(&filter)?;
        Ok((count, breakdown(&by_status, count), breakdown(&by_priority, count)))
    }

    fn task_insights(&self, user_id: &str) -> Result<TaskInsights> {
        let total_tasks = self.task_repo.count_tasks(&TaskFilter::for_user(user_id))?;
        let (individual_count, individual_status, individual_priority) =
            self.task_subset(user_id, TaskType::Independent)?;
        let (goal_related_count, goal_related_status, goal_related_priority) =
            self.task_subset(user_id, TaskType::GoalRelated)?;

        Ok(TaskInsights {
            total_tasks,
            individual_tasks_count: individual_count,
            individual_tasks_percentage: calculate_percentage(individual_count, total_tasks),
            individual_task_status_counts: individual_status,
            individual_task_priority_counts: individual_priority,
            goal_related_tasks_count: goal_related_count,
            goal_related_tasks_percentage: calculate_percentage(goal_related_count, total_tasks),
            goal_related_task_status_counts: goal_related_status,
            goal_related_task_priority_counts: goal_related_priority,
        })
    }
}

impl InsightsServiceTrait for InsightsService {
    fn get_dashboard_insights(&self, user_id: &str) -> Result<DashboardInsights> {
        debug!("Computing dashboard insights for user {}", user_id);
        Ok(DashboardInsights {
            goal_insights: self.goal_insights(user_id)?,
            task_insights: self.task_insights(user_id)?,
        })
    }

    fn count_open_goals(&self, user_id: &str) -> Result<i64> {
        self.goal_repo
            .count_goals(&GoalFilter::for_user(user_id).with_status(Status::Open))
    }
}
