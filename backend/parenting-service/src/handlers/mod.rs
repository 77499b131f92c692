//! HTTP handlers
//!
//! Handlers resolve the model credential and the post author, call into the
//! service layer, and wrap results as `{post}` or `{data}`. Errors leave
//! through `ServiceError`'s `ResponseError` impl.

pub mod baby_state;
pub mod feedback;
pub mod health;
pub mod insights;
pub mod posts;

pub use baby_state::analyze_baby_state;
pub use feedback::summarize_feedback;
pub use health::{health, metrics, ready, status};
pub use insights::create_insight;
pub use posts::create_post;

use actix_web::HttpRequest;
use serde::Serialize;

/// Per-request model key supplied by the client
pub const API_KEY_HEADER: &str = "X-Gemini-Api-Key";

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

pub(crate) fn header_api_key(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
}
