use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::models::{ApiCredential, FeedbackSummary, FeedbackSummaryRequest};
use crate::providers::{generate_structured, GenerationRequest, ModelProvider, ProviderError};
use crate::validators;

const PIPELINE: &str = "feedback_summary";

pub const SUMMARY_FAILURE_MESSAGE: &str =
    "Failed to summarize community feedback. Please try again.";

#[async_trait]
pub trait FeedbackSummarizer: Send + Sync {
    async fn summarize(
        &self,
        credential: &ApiCredential,
        posts: &[String],
    ) -> std::result::Result<FeedbackSummary, ProviderError>;
}

pub struct LlmFeedbackSummarizer {
    provider: Arc<dyn ModelProvider>,
}

impl LlmFeedbackSummarizer {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(posts: &[String]) -> String {
        let numbered = posts
            .iter()
            .enumerate()
            .map(|(i, post)| format!("{}. {}", i + 1, single_line(post)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You help the moderators of a parenting community understand what members are talking about.

Here are recent community posts, one per line:
{numbered}

Write a short, neutral summary of the overall feedback and list the main recurring themes (at most five, a few words each).

Reply with JSON: "summary" (string) and "keyThemes" (array of strings)."#,
            numbered = numbered
        )
    }

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "summary": { "type": "STRING" },
                "keyThemes": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["summary", "keyThemes"]
        })
    }
}

/// Join a post's lines with spaces so each post stays on its numbered line
fn single_line(post: &str) -> String {
    post.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl FeedbackSummarizer for LlmFeedbackSummarizer {
    async fn summarize(
        &self,
        credential: &ApiCredential,
        posts: &[String],
    ) -> std::result::Result<FeedbackSummary, ProviderError> {
        let generation = GenerationRequest::new(Self::build_prompt(posts), Self::response_schema())
            .with_temperature(0.3);

        generate_structured(self.provider.as_ref(), credential, &generation).await
    }
}

pub async fn summarize_community_feedback(
    summarizer: &dyn FeedbackSummarizer,
    credential: &ApiCredential,
    request: FeedbackSummaryRequest,
) -> Result<FeedbackSummary> {
    let request = request.trimmed();

    if let Err(field_errors) = validators::validate(&request) {
        metrics::record_pipeline_outcome(PIPELINE, "invalid");
        return Err(field_errors.into());
    }

    match summarizer.summarize(credential, &request.posts).await {
        Ok(summary) => {
            info!(posts = request.posts.len(), "Community feedback summarized");
            metrics::record_pipeline_outcome(PIPELINE, "succeeded");
            Ok(summary)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Feedback summarization failed");
            metrics::record_pipeline_outcome(PIPELINE, "failed");
            Err(ServiceError::Upstream(SUMMARY_FAILURE_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_numbers_posts() {
        let posts = vec!["Teething is rough".to_string(), "Naps are short".to_string()];
        let prompt = LlmFeedbackSummarizer::build_prompt(&posts);
        assert!(prompt.contains("1. Teething is rough\n2. Naps are short"));
    }

    #[test]
    fn test_multiline_post_stays_on_one_numbered_line() {
        let posts = vec![
            "Teething is rough.\nAny tips?\r\n\nWe tried cold rings.".to_string(),
            "Naps are short".to_string(),
        ];
        let prompt = LlmFeedbackSummarizer::build_prompt(&posts);

        assert!(prompt.contains(
            "1. Teething is rough. Any tips? We tried cold rings.\n2. Naps are short"
        ));
    }
}
