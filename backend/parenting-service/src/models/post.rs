use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validators::validate_post_content;

/// Maximum post length, counted in characters after trimming
pub const MAX_POST_LENGTH: usize = 500;

/// Display timestamp given to a freshly created post
pub const JUST_NOW: &str = "Just now";

/// Post author as resolved by the caller (no identity system behind it yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub avatar_url: String,
}

/// Raw community post submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostSubmission {
    #[serde(default)]
    #[validate(custom(function = "validate_post_content"))]
    pub content: String,
}

impl PostSubmission {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Strip surrounding whitespace before length rules are applied
    pub fn trimmed(self) -> Self {
        Self {
            content: self.content.trim().to_string(),
        }
    }
}

/// A post that passed validation and moderation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: String,
    pub author: Author,
    pub content: String,
    /// Display-formatted creation time
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    pub comments: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_trimmed() {
        let submission = PostSubmission::new("  My baby slept well!\n").trimmed();
        assert_eq!(submission.content, "My baby slept well!");
    }

    #[test]
    fn test_missing_content_deserializes_as_empty() {
        let submission: PostSubmission = serde_json::from_str("{}").unwrap();
        assert!(submission.content.is_empty());
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = CommunityPost {
            id: "p1".to_string(),
            author: Author {
                name: "You".to_string(),
                avatar_url: "https://placehold.co/40x40.png".to_string(),
            },
            content: "hello".to_string(),
            timestamp: JUST_NOW.to_string(),
            created_at: Utc::now(),
            likes: 0,
            comments: 0,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["author"]["avatarUrl"], "https://placehold.co/40x40.png");
        assert_eq!(json["timestamp"], "Just now");
        assert!(json.get("createdAt").is_some());
    }
}
