//! Suggestions module - prompts, the generative client and response parsing.

mod genai_client;
mod suggestions_model;
mod suggestions_service;
mod suggestions_traits;

#[cfg(test)]
mod suggestions_service_tests;

pub use genai_client::GenAiClient;
pub use suggestions_model::{
    Candidate, Content, DashboardInfo, GenerateContentRequest, GenerateContentResponse,
    GoalDetails, GoalSuggestions, GoalTask, Part,
};
pub use suggestions_service::{
    dashboard_info_prompt, first_candidate_text, goal_suggestions_prompt, parse_completion,
    strip_code_fences, SuggestionService,
};
pub use suggestions_traits::{CompletionProviderTrait, SuggestionServiceTrait};
