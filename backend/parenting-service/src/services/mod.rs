pub mod baby_state_analyzer;
pub mod credentials;
pub mod feedback_summarizer;
pub mod insight_generator;
pub mod post_pipeline;
pub mod toxicity_classifier;

pub use baby_state_analyzer::{analyze_baby_state, BabyStateAnalyzer, LlmBabyStateAnalyzer};
pub use credentials::CredentialResolver;
pub use feedback_summarizer::{
    summarize_community_feedback, FeedbackSummarizer, LlmFeedbackSummarizer,
};
pub use insight_generator::{get_parenting_insight, InsightGenerator, LlmInsightGenerator};
pub use post_pipeline::{assemble_post, CommunityPostPipeline, SubmissionOutcome, ValidatedContent};
pub use toxicity_classifier::{LlmToxicityClassifier, ToxicityClassifier};
