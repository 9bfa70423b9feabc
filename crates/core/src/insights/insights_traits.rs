use crate::errors::Result;
use crate::insights::insights_model::DashboardInsights;

/// Read-only dashboard aggregation over a user's active goals and tasks.
pub trait InsightsServiceTrait: Send + Sync {
    fn get_dashboard_insights(&self, user_id: &str) -> Result<DashboardInsights>;
    /// Active goals of the user still in `Open` status.
    fn count_open_goals(&self, user_id: &str) -> Result<i64>;
}
