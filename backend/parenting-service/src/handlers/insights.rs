use actix_web::{web, HttpRequest, HttpResponse};

use super::{header_api_key, DataResponse};
use crate::app_state::AppState;
use crate::error::Result;
use crate::models::InsightRequest;
use crate::services::get_parenting_insight;

pub async fn create_insight(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<InsightRequest>,
) -> Result<HttpResponse> {
    let credential = state.credentials.resolve(None, header_api_key(&req))?;

    let data = get_parenting_insight(
        state.services.insight_generator.as_ref(),
        &credential,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(DataResponse { data }))
}
