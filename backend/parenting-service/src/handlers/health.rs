use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::app_state::AppState;
use crate::metrics::gather_metrics;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub model_configured: bool,
    pub provider: String,
    pub model: String,
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": state.config.service_name,
    }))
}

/// No backing stores, so ready as soon as the server accepts connections
pub async fn ready() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ready" }))
}

/// Whether a server-side model key is configured. Clients without one must send their own.
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        model_configured: state.credentials.has_server_credential(),
        provider: state.model_info.provider.clone(),
        model: state.model_info.model.clone(),
    })
}

pub async fn metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(gather_metrics())
}
