//! Parenting service - moderated community posts and model-backed parenting tools
//!
//! This service provides:
//! - Community post creation behind length validation and LLM toxicity moderation
//! - Parenting insights from a description of the baby's activity
//! - Baby state analysis from a photo
//! - Summaries of community feedback
//!
//! Every model call goes through [`providers::ModelProvider`] with the timeout and
//! retry policy from the `resilience` library.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod validators;

pub use app_state::{AppServices, AppState, ModelInfo};
pub use config::{Config, LogFormat};
pub use error::{ErrorResponse, Result, ServiceError};
pub use providers::{GeminiProvider, ModelProvider, ProviderError};
