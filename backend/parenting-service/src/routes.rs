use actix_web::{error::JsonPayloadError, web};

use crate::error::ServiceError;
use crate::handlers;

/// Register every route on an `App` or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/ready", web::get().to(handlers::ready))
        .route("/metrics", web::get().to(handlers::metrics))
        .service(
            web::scope("/api/v1")
                .route("/status", web::get().to(handlers::status))
                .route("/community/posts", web::post().to(handlers::create_post))
                .route(
                    "/community/feedback/summary",
                    web::post().to(handlers::summarize_feedback),
                )
                .route("/insights", web::post().to(handlers::create_insight))
                .route(
                    "/baby-state/analyze",
                    web::post().to(handlers::analyze_baby_state),
                ),
        );
}

/// JSON extractor settings: body limit, and malformed bodies in the uniform error shape
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "Request body is too large.".to_string()
                }
                JsonPayloadError::ContentType => {
                    "Content type must be application/json.".to_string()
                }
                other => format!("Malformed JSON body: {}", other),
            };
            ServiceError::BadRequest(message).into()
        })
}
