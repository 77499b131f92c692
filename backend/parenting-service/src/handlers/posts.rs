use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::header_api_key;
use crate::app_state::AppState;
use crate::error::{Result, ServiceError};
use crate::models::{CommunityPost, PostSubmission};
use crate::services::SubmissionOutcome;

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub post: CommunityPost,
}

/// Validate, moderate, and create a community post.
///
/// Content errors are reported before the model credential is looked up.
pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PostSubmission>,
) -> Result<HttpResponse> {
    let pipeline = &state.services.post_pipeline;
    let content = pipeline.validate(body.into_inner())?;

    let credential = state.credentials.resolve(None, header_api_key(&req))?;
    let author = state.config.default_author();

    match pipeline.moderate(content, author, &credential).await? {
        SubmissionOutcome::Published(post) => {
            Ok(HttpResponse::Created().json(CreatePostResponse { post }))
        }
        SubmissionOutcome::Rejected { reason } => Err(ServiceError::ContentRejected(
            SubmissionOutcome::rejection_message(&reason),
        )),
    }
}
