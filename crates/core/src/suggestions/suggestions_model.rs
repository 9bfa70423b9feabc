//! Generative endpoint wire types and the suggestion payloads built from them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A text fragment of a content block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Body of a completion request: `{"contents":[{"parts":[{"text": ...}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

/// Completion response. The default value (no candidates) stands for a
/// failed call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<serde_json::Value>,
}

/// Free-text description of a goal used to request task suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDetails {
    pub goal: String,
    pub importance: String,
    /// Months.
    pub time_frame: i32,
    /// Hours per week.
    pub time_per_week: i32,
}

/// Reads any JSON scalar as text. `null` becomes empty; numbers and booleans
/// keep their JSON spelling.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A list of loose strings where `null` means empty.
fn loose_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}

/// One suggested task as produced by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalTask {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: String,
    /// Free-text priority label.
    #[serde(default, deserialize_with = "loose_string")]
    pub priority: String,
    /// ISO-8601 date string.
    #[serde(default, deserialize_with = "loose_string")]
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSuggestions {
    pub tasks: Vec<GoalTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardInfo {
    #[serde(default, deserialize_with = "loose_strings")]
    pub insights: Vec<String>,
    #[serde(default, deserialize_with = "loose_strings")]
    pub motivations: Vec<String>,
}
