//! Parenting service - HTTP entry point

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use parenting_service::{routes, telemetry, AppState, Config, GeminiProvider};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log_format);

    info!(?config, "Starting {}", config.service_name);

    if config.server_credential().is_none() {
        warn!("No GEMINI_API_KEY or GOOGLE_API_KEY set; clients must send their own key");
    }

    let provider = GeminiProvider::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.model_policy(),
    )
    .context("Failed to build Gemini client")?;

    let bind_addr = ("0.0.0.0", config.port);
    let state = web::Data::new(AppState::from_provider(config, Arc::new(provider)));
    let json_limit = state.config.max_request_bytes;

    info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(routes::json_config(json_limit))
            .wrap(cors(&state.config))
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(bind_addr)
    .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("Parenting service shut down");
    Ok(())
}

fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    match config.allowed_origins() {
        None => cors.allow_any_origin(),
        Some(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
