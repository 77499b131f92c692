use actix_web::{web, HttpRequest, HttpResponse};

use super::{header_api_key, DataResponse};
use crate::app_state::AppState;
use crate::error::Result;
use crate::models::FeedbackSummaryRequest;
use crate::services::summarize_community_feedback;

pub async fn summarize_feedback(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<FeedbackSummaryRequest>,
) -> Result<HttpResponse> {
    let credential = state.credentials.resolve(None, header_api_key(&req))?;

    let data = summarize_community_feedback(
        state.services.feedback_summarizer.as_ref(),
        &credential,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(DataResponse { data }))
}
