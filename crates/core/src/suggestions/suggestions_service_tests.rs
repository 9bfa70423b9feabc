#[cfg(test)]
mod tests {
    use crate::errors::{ErrorCategory, Result};
    use crate::insights::{DashboardInsights, GoalInsights, InsightsServiceTrait, TaskInsights};
    use crate::suggestions::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- Mock completion provider ---
    #[derive(Clone, Default)]
    struct MockProvider {
        reply: Option<String>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CompletionProviderTrait for MockProvider {
        async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(match &self.reply {
                Some(text) => GenerateContentResponse {
                    candidates: vec![Candidate {
                        content: Content {
                            parts: vec![Part { text: text.clone() }],
                        },
                    }],
                    prompt_feedback: None,
                },
                // Transport failure as seen through the client.
                None => GenerateContentResponse::default(),
            })
        }
    }

    // --- Mock insights ---
    struct MockInsights;

    impl InsightsServiceTrait for MockInsights {
        fn get_dashboard_insights(&self, _user_id: &str) -> Result<DashboardInsights> {
            Ok(DashboardInsights {
                goal_insights: GoalInsights {
                    total_goals: 7,
                    goal_status_counts: Vec::new(),
                    goal_priority_counts: Vec::new(),
                },
                task_insights: TaskInsights {
                    total_tasks: 19,
                    individual_tasks_count: 0,
                    individual_tasks_percentage: 0,
                    individual_task_status_counts: Vec::new(),
                    individual_task_priority_counts: Vec::new(),
                    goal_related_tasks_count: 0,
                    goal_related_tasks_percentage: 0,
                    goal_related_task_status_counts: Vec::new(),
                    goal_related_task_priority_counts: Vec::new(),
                },
            })
        }

        fn count_open_goals(&self, _user_id: &str) -> Result<i64> {
            Ok(3)
        }
    }

    const TASKS_JSON: &str = r#"[
        {"Title": "Pick a course", "Description": "Choose an online course", "Priority": "High", "Deadline": "2024-03-01"},
        {"title": "Practice daily", "description": "30 minutes a day", "priority": "Medium", "deadline": "2024-04-01T00:00:00Z"}
    ]"#;

    fn service(provider: MockProvider) -> SuggestionService {
        SuggestionService::new(Arc::new(provider), Arc::new(MockInsights))
    }

    fn details() -> GoalDetails {
        GoalDetails {
            goal: "Learn Spanish".to_string(),
            importance: "Moving abroad".to_string(),
            time_frame: 6,
            time_per_week: 5,
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "\n[1]\n");
        assert_eq!(strip_code_fences("```[1]``` ```"), "[1] ");
        assert_eq!(strip_code_fences("[1]"), "[1]");
    }

    #[tokio::test]
    async fn test_fenced_and_plain_responses_parse_identically() {
        let fenced = format!("```json\n{}\n```", TASKS_JSON);
        let from_fenced = service(MockProvider::replying(&fenced))
            .get_goal_suggestions(details())
            .await
            .unwrap();
        let from_plain = service(MockProvider::replying(TASKS_JSON))
            .get_goal_suggestions(details())
            .await
            .unwrap();

        assert_eq!(from_fenced, from_plain);
        assert_eq!(from_plain.tasks.len(), 2);
        assert_eq!(from_plain.tasks[0].title, "Pick a course");
        assert_eq!(from_plain.tasks[0].priority, "High");
        assert_eq!(from_plain.tasks[1].deadline, "2024-04-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_null_and_numeric_fields_are_tolerated() {
        let reply = "```json\n[\n\
            {\"Title\": \"A\", \"Description\": null, \"Priority\": \"High\", \"Deadline\": null},\n\
            {\"Description\": \"no title\", \"Priority\": 1, \"Deadline\": \"2024-05-01\"}\n\
            ]\n```";
        let suggestions = service(MockProvider::replying(reply))
            .get_goal_suggestions(details())
            .await
            .unwrap();

        assert_eq!(
            suggestions.tasks,
            vec![
                GoalTask {
                    title: "A".to_string(),
                    description: String::new(),
                    priority: "High".to_string(),
                    deadline: String::new(),
                },
                GoalTask {
                    title: String::new(),
                    description: "no title".to_string(),
                    priority: "1".to_string(),
                    deadline: "2024-05-01".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_null_dashboard_lists_are_empty() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content {
                    parts: vec![Part {
                        text: r#"{"Insights": null, "Motivations": ["go", null]}"#.to_string(),
                    }],
                },
            }],
            prompt_feedback: None,
        };
        let info: DashboardInfo = parse_completion(&response).unwrap();
        assert!(info.insights.is_empty());
        assert_eq!(info.motivations, vec!["go"]);
    }

    #[tokio::test]
    async fn test_prompt_embeds_goal_details() {
        let provider = MockProvider::replying("[]");
        let prompts = provider.prompts.clone();
        let suggestions = service(provider)
            .get_goal_suggestions(details())
            .await
            .unwrap();
        assert!(suggestions.tasks.is_empty());

        let prompt = prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("1. **Goal**: Learn Spanish"));
        assert!(prompt.contains("3. **Timeframe**: 6"));
        assert!(prompt.contains("4. **Time per Week**: 5 hours"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let err = service(MockProvider::default())
            .get_goal_suggestions(details())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let err = service(MockProvider::replying("Sure! Here are your tasks:"))
            .get_goal_suggestions(details())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[tokio::test]
    async fn test_dashboard_info_uses_aggregates() {
        let provider = MockProvider::replying(
            "```json\n{\"Insights\": [\"a\", \"b\", \"c\"], \"Motivations\": [\"keep going\"]}\n```",
        );
        let prompts = provider.prompts.clone();
        let info = service(provider).get_dashboard_info("alice").await.unwrap();

        assert_eq!(info.insights, vec!["a", "b", "c"]);
        assert_eq!(info.motivations, vec!["keep going"]);

        let prompt = prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Total number of goals: 7"));
        assert!(prompt.contains("Total number of goals open: 3"));
        assert!(prompt.contains("Total number of tasks: 19"));
    }

    #[test]
    fn test_candidate_without_parts_is_an_error() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate::default()],
            prompt_feedback: None,
        };
        assert!(first_candidate_text(&response).is_err());
    }
}
