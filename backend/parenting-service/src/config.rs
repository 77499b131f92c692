//! Configuration for the parenting service
use resilience::{model_inference_config, RetryConfig, ServiceConfig};
use serde::Deserialize;
use std::time::Duration;

use crate::models::{ApiCredential, Author};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Main configuration struct, loaded from environment variables
#[derive(Clone, Deserialize)]
pub struct Config {
    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default = "default_environment")]
    pub environment: String,

    /// Server-side model key, checked before `GOOGLE_API_KEY`
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub google_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    // ============================================
    // Model call policy
    // ============================================
    /// Per-attempt timeout
    #[serde(default = "default_model_timeout_secs")]
    pub model_timeout_secs: u64,

    /// Retries after the first attempt, transient failures only
    #[serde(default = "default_model_max_retries")]
    pub model_max_retries: u32,

    #[serde(default = "default_model_initial_backoff_ms")]
    pub model_initial_backoff_ms: u64,

    #[serde(default = "default_model_max_backoff_ms")]
    pub model_max_backoff_ms: u64,

    // ============================================
    // Request limits
    // ============================================
    /// Decoded photo size limit
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,

    /// JSON body size limit
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,

    // ============================================
    // Post author placeholder
    // ============================================
    #[serde(default = "default_author_name")]
    pub default_author_name: String,

    #[serde(default = "default_author_avatar_url")]
    pub default_author_avatar_url: String,

    /// Comma-separated origins, or "*"
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_port() -> u16 {
    8080
}

fn default_service_name() -> String {
    "parenting-service".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    crate::providers::gemini::DEFAULT_BASE_URL.to_string()
}

fn default_model_timeout_secs() -> u64 {
    30
}

fn default_model_max_retries() -> u32 {
    2
}

fn default_model_initial_backoff_ms() -> u64 {
    250
}

fn default_model_max_backoff_ms() -> u64 {
    4000
}

fn default_max_photo_bytes() -> usize {
    8 * 1024 * 1024 // 8 MiB
}

fn default_max_request_bytes() -> usize {
    12 * 1024 * 1024 // base64 photo plus envelope
}

fn default_author_name() -> String {
    "You".to_string()
}

fn default_author_avatar_url() -> String {
    "https://placehold.co/40x40.png".to_string()
}

fn default_cors_allowed_origins() -> String {
    "*".to_string()
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Timeout and retry policy applied to every model call
    pub fn model_policy(&self) -> ServiceConfig {
        let preset = model_inference_config();
        ServiceConfig::new(
            Duration::from_secs(self.model_timeout_secs),
            RetryConfig {
                max_retries: self.model_max_retries,
                initial_backoff: Duration::from_millis(self.model_initial_backoff_ms),
                max_backoff: Duration::from_millis(self.model_max_backoff_ms),
                ..preset.retry
            },
        )
    }

    /// First non-blank of `GEMINI_API_KEY`, `GOOGLE_API_KEY`
    pub fn server_credential(&self) -> Option<ApiCredential> {
        self.gemini_api_key
            .as_deref()
            .and_then(ApiCredential::new)
            .or_else(|| self.google_api_key.as_deref().and_then(ApiCredential::new))
    }

    pub fn default_author(&self) -> Author {
        Author {
            name: self.default_author_name.clone(),
            avatar_url: self.default_author_avatar_url.clone(),
        }
    }

    /// `None` means any origin is allowed
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("service_name", &self.service_name)
            .field("environment", &self.environment)
            .field("server_credential", &self.server_credential().is_some())
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("model_timeout_secs", &self.model_timeout_secs)
            .field("model_max_retries", &self.model_max_retries)
            .field("max_photo_bytes", &self.max_photo_bytes)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.max_photo_bytes, 8 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.server_credential().is_none());
        assert!(config.allowed_origins().is_none());

        let author = config.default_author();
        assert_eq!(author.name, "You");
        assert_eq!(author.avatar_url, "https://placehold.co/40x40.png");
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("PORT", "9090"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("LOG_FORMAT", "json"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ]);

        assert_eq!(config.port, 9090);
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.allowed_origins(),
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn test_server_credential_order() {
        let config = from_pairs(&[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]);
        assert_eq!(config.server_credential().unwrap().expose(), "gemini");

        let config = from_pairs(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "google")]);
        assert_eq!(config.server_credential().unwrap().expose(), "google");
    }

    #[test]
    fn test_model_policy() {
        let config = from_pairs(&[("MODEL_TIMEOUT_SECS", "5"), ("MODEL_MAX_RETRIES", "0")]);
        let policy = config.model_policy();

        assert_eq!(policy.timeout.duration, Duration::from_secs(5));
        assert_eq!(policy.retry.max_retries, 0);
        assert_eq!(policy.retry.initial_backoff, Duration::from_millis(250));
        assert_eq!(policy.retry.max_backoff, Duration::from_secs(4));
        assert_eq!(policy.retry.backoff_multiplier, 2.0);
        assert!(policy.retry.jitter);
    }

    #[test]
    fn test_debug_hides_keys() {
        let config = from_pairs(&[("GEMINI_API_KEY", "secret-value")]);
        assert!(!format!("{:?}", config).contains("secret-value"));
    }
}
