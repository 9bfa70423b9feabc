use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::insights::InsightsServiceTrait;
use crate::suggestions::suggestions_model::{
    DashboardInfo, GenerateContentResponse, GoalDetails, GoalSuggestions, GoalTask,
};
use crate::suggestions::suggestions_traits::{CompletionProviderTrait, SuggestionServiceTrait};

/// Removes Markdown code fences: every "```json", then every remaining "```".
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Text of the first part of the first candidate.
pub fn first_candidate_text(response: &GenerateContentResponse) -> Result<&str> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| Error::Suggestion("completion returned no candidates".to_string()))?;
    let part = candidate
        .content
        .parts
        .first()
        .ok_or_else(|| Error::Suggestion("completion candidate has no parts".to_string()))?;
    Ok(&part.text)
}

/// Lower-cases object keys so capitalized field names from the model match.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Strips fences from the completion text and parses it as `T`.
pub fn parse_completion<T: DeserializeOwned>(response: &GenerateContentResponse) -> Result<T> {
    let text = first_candidate_text(response)?;
    let json = strip_code_fences(text);
    let value: Value = serde_json::from_str(json.trim())?;
    Ok(serde_json::from_value(lowercase_keys(value))?)
}

pub fn goal_suggestions_prompt(details: &GoalDetails) -> String {
    format!(
        "You are developing an application for goal management, and a user has just submitted some information about their goal. Here's a summary of the user's input:\n\n\
         1. **Goal**: {}\n\
         2. **Importance**: {}\n\
         3. **Timeframe**: {}\n\
         4. **Time per Week**: {} hours\n\n\
         Based on this information, your task is to generate a list of SMART goal tasks. SMART goals are Specific, Measurable, Achievable, Relevant, and Time-bound. Consider the user's input to generate actionable tasks that align with their goal and timeframe. Once generated, provide the user with a list of suggested tasks to help them achieve their goal effectively in parsable json format only.\n\n\
         The response should be a list of tasks represented by the following properties:\n\
         - Title: A short title of the task\n\
         - Description: A brief description of the task\n\
         - Priority: The priority level of the task\n\
         - Deadline: The deadline by which the task should be completed in the ISO 8601 format",
        details.goal, details.importance, details.time_frame, details.time_per_week
    )
}

pub fn dashboard_info_prompt(total_goals: i64, open_goals: i64, total_tasks: i64) -> String {
    format!(
        "You are developing an application for goal management, and a user have some goal and tasks created following the SMART technique. Here's the goal and task information:\n\n\
         Total number of goals: {}\n\
         Total number of goals open: {}\n\
         Total number of tasks: {}\n\n\
         Based on this information, your task is to generate a list of insights and information that can be shown to the users to know more about the progress and how they can improve.\n\n\
         The response should be a json object with the below properties that can be parsed easily\n\
         - Insights: A list of minimum 3 strings with insights\n\
         - Motivations: A list of minimum 3 strings with creative motivation for the user\n",
        total_goals, open_goals, total_tasks
    )
}

pub struct SuggestionService {
    provider: Arc<dyn CompletionProviderTrait>,
    insights_service: Arc<dyn InsightsServiceTrait>,
}

impl SuggestionService {
    pub fn new(
        provider: Arc<dyn CompletionProviderTrait>,
        insights_service: Arc<dyn InsightsServiceTrait>,
    ) -> Self {
        Self {
            provider,
            insights_service,
        }
    }
}

#[async_trait]
impl SuggestionServiceTrait for SuggestionService {
    async fn get_goal_suggestions(&self, details: GoalDetails) -> Result<GoalSuggestions> {
        debug!("Requesting task suggestions for goal '{}'", details.goal);
        let prompt = goal_suggestions_prompt(&details);
        let response = self.provider.generate(&prompt).await?;

        let tasks: Vec<GoalTask> = parse_completion(&response).map_err(|e| {
            error!("Failed to process goal suggestions: {}", e);
            e
        })?;
        debug!("Received {} suggested tasks", tasks.len());
        Ok(GoalSuggestions { tasks })
    }

    async fn get_dashboard_info(&self, user_id: &str) -> Result<DashboardInfo> {
        info!("Retrieving dashboard info for user {}", user_id);
        let insights = self.insights_service.get_dashboard_insights(user_id)?;
        let open_goals = self.insights_service.count_open_goals(user_id)?;
        let prompt = dashboard_info_prompt(
            insights.goal_insights.total_goals,
            open_goals,
            insights.task_insights.total_tasks,
        );
        let response = self.provider.generate(&prompt).await?;

        parse_completion(&response).map_err(|e| {
            error!("Failed to process dashboard info: {}", e);
            e
        })
    }
}
