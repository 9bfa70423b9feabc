//! Insights module - dashboard aggregation over goals and tasks.

mod insights_model;
mod insights_service;
mod insights_traits;


pub use insights_model::{
    calculate_percentage, CountPercentage, DashboardInsights, GoalInsights, TaskInsights,
};
pub use insights_service::InsightsService;
pub use insights_traits::InsightsServiceTrait;
