//! Community post pipeline: validate, moderate, then assemble.
//!
//! Each stage only runs when the previous one succeeded. A post that fails
//! validation never reaches the classifier, and a post the classifier flags
//! is never assembled.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::models::post::JUST_NOW;
use crate::models::{ApiCredential, Author, CommunityPost, PostSubmission};
use crate::services::toxicity_classifier::ToxicityClassifier;
use crate::validators;

const PIPELINE: &str = "post";

/// Returned when moderation could not run
pub const POST_FAILURE_MESSAGE: &str = "Could not create post. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Published(CommunityPost),
    /// Declined by moderation; `reason` is never empty
    Rejected { reason: String },
}

impl SubmissionOutcome {
    /// User-facing text for a rejection
    pub fn rejection_message(reason: &str) -> String {
        format!("Post cannot be created. Reason: {}", reason)
    }
}

/// Trimmed content within the length limits, not yet moderated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContent(String);

impl ValidatedContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content that passed validation and moderation. Only the pipeline can make one.
#[derive(Debug)]
pub struct ClearedContent(String);

/// Build the published post: fresh id, "Just now" timestamp, zero counters
pub fn assemble_post(content: ClearedContent, author: Author) -> CommunityPost {
    CommunityPost {
        id: Uuid::new_v4().to_string(),
        author,
        content: content.0,
        timestamp: JUST_NOW.to_string(),
        created_at: Utc::now(),
        likes: 0,
        comments: 0,
    }
}

pub struct CommunityPostPipeline {
    classifier: Arc<dyn ToxicityClassifier>,
}

impl CommunityPostPipeline {
    pub fn new(classifier: Arc<dyn ToxicityClassifier>) -> Self {
        Self { classifier }
    }

    /// Validate then moderate, in one call
    pub async fn submit(
        &self,
        submission: PostSubmission,
        author: Author,
        credential: &ApiCredential,
    ) -> Result<SubmissionOutcome> {
        let validated = self.validate(submission)?;
        self.moderate(validated, author, credential).await
    }

    /// Trim and length-check a submission. Needs no credential.
    pub fn validate(&self, submission: PostSubmission) -> Result<ValidatedContent> {
        let submission = submission.trimmed();

        if let Err(field_errors) = validators::validate(&submission) {
            metrics::record_pipeline_outcome(PIPELINE, "invalid");
            return Err(field_errors.into());
        }

        Ok(ValidatedContent(submission.content))
    }

    /// Classify validated content, then reject it or assemble the post
    pub async fn moderate(
        &self,
        content: ValidatedContent,
        author: Author,
        credential: &ApiCredential,
    ) -> Result<SubmissionOutcome> {
        let verdict = match self.classifier.classify(credential, &content.0).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Toxicity classification failed");
                metrics::record_pipeline_outcome(PIPELINE, "failed");
                return Err(ServiceError::Upstream(POST_FAILURE_MESSAGE.to_string()));
            }
        };

        if verdict.is_toxic {
            let reason = verdict.reason_or_fallback().to_string();
            warn!(reason = %reason, "Community post rejected by moderation");
            metrics::record_pipeline_outcome(PIPELINE, "rejected");
            return Ok(SubmissionOutcome::Rejected { reason });
        }

        let post = assemble_post(ClearedContent(content.0), author);
        info!(post_id = %post.id, length = post.content.chars().count(), "Community post created");
        metrics::record_pipeline_outcome(PIPELINE, "published");

        Ok(SubmissionOutcome::Published(post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            name: "You".to_string(),
            avatar_url: "https://placehold.co/40x40.png".to_string(),
        }
    }

    #[test]
    fn test_assemble_post_defaults() {
        let post = assemble_post(ClearedContent("Tummy time went great".to_string()), author());

        assert_eq!(post.content, "Tummy time went great");
        assert_eq!(post.timestamp, "Just now");
        assert_eq!(post.likes, 0);
        assert_eq!(post.comments, 0);
        assert!(Uuid::parse_str(&post.id).is_ok());
    }

    #[test]
    fn test_assembled_ids_are_unique() {
        let a = assemble_post(ClearedContent("a".to_string()), author());
        let b = assemble_post(ClearedContent("a".to_string()), author());
        assert_ne!(a.id, b.id);
    }

    struct UnreachableClassifier;

    #[async_trait::async_trait]
    impl ToxicityClassifier for UnreachableClassifier {
        async fn classify(
            &self,
            _credential: &ApiCredential,
            _text: &str,
        ) -> std::result::Result<crate::models::ToxicityVerdict, crate::providers::ProviderError>
        {
            panic!("validation must not call the classifier")
        }
    }

    #[test]
    fn test_validate_needs_no_credential() {
        let pipeline = CommunityPostPipeline::new(Arc::new(UnreachableClassifier));

        let validated = pipeline.validate(PostSubmission::new("  Hello  ")).unwrap();
        assert_eq!(validated.as_str(), "Hello");

        let err = pipeline.validate(PostSubmission::new("")).unwrap_err();
        assert_eq!(err.to_string(), "Post cannot be empty.");
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(
            SubmissionOutcome::rejection_message("Harassment"),
            "Post cannot be created. Reason: Harassment"
        );
    }
}
