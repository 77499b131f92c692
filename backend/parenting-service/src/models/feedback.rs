use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validators::validate_feedback_entries;

/// A batch of community post texts to summarise
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FeedbackSummaryRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 50, message = "Provide between 1 and 50 posts to summarize."),
        custom(function = "validate_feedback_entries")
    )]
    pub posts: Vec<String>,
}

impl FeedbackSummaryRequest {
    pub fn trimmed(self) -> Self {
        Self {
            posts: self
                .posts
                .into_iter()
                .map(|post| post.trim().to_string())
                .collect(),
        }
    }
}

/// Model-generated overview of what the community is talking about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub summary: String,
    #[serde(default)]
    pub key_themes: Vec<String>,
}
