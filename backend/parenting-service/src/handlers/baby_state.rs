use actix_web::{web, HttpRequest, HttpResponse};

use super::{header_api_key, DataResponse};
use crate::app_state::AppState;
use crate::error::Result;
use crate::models::AnalyzeBabyStateRequest;
use crate::services;

/// Describe a baby's mood, activity and needs from a photo.
///
/// The body may carry its own `apiKey`, which takes precedence over the header.
pub async fn analyze_baby_state(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AnalyzeBabyStateRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let credential = state
        .credentials
        .resolve(body.api_key.as_deref(), header_api_key(&req))?;

    let data = services::analyze_baby_state(
        state.services.baby_state_analyzer.as_ref(),
        &credential,
        &body.photo_data_uri,
        state.config.max_photo_bytes,
    )
    .await?;

    Ok(HttpResponse::Ok().json(DataResponse { data }))
}
