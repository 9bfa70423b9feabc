use async_trait::async_trait;

use crate::errors::Result;
use crate::suggestions::suggestions_model::{
    DashboardInfo, GenerateContentResponse, GoalDetails, GoalSuggestions,
};

/// Source of text completions.
#[async_trait]
pub trait CompletionProviderTrait: Send + Sync {
    /// Sends `prompt` and returns the raw response.
    ///
    /// Transport failures yield an empty response rather than an error; only
    /// missing configuration is reported.
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse>;
}

#[async_trait]
pub trait SuggestionServiceTrait: Send + Sync {
    async fn get_goal_suggestions(&self, details: GoalDetails) -> Result<GoalSuggestions>;
    async fn get_dashboard_info(&self, user_id: &str) -> Result<DashboardInfo>;
}
