pub mod baby_state;
pub mod credential;
pub mod feedback;
pub mod insight;
pub mod moderation;
pub mod post;

pub use baby_state::{AnalyzeBabyStateRequest, BabyState};
pub use credential::ApiCredential;
pub use feedback::{FeedbackSummary, FeedbackSummaryRequest};
pub use insight::{InsightRequest, InsightResult};
pub use moderation::ToxicityVerdict;
pub use post::{Author, CommunityPost, PostSubmission};
