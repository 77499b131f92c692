//! Hosted model providers

pub mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use resilience::TimeoutError;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::ApiCredential;

/// Errors surfaced by a model provider call
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Model API rejected the credential ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Model API rate limited the request: {0}")]
    RateLimited(String),

    #[error("Model API rejected the request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("Model API server error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Timeout(#[from] TimeoutError),

    #[error("Response blocked by model safety settings: {0}")]
    Blocked(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status from the provider
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.chars().take(512).collect::<String>();
        match status {
            401 | 403 => ProviderError::Unauthorized { status, message },
            // Gemini reports bad keys as 400 INVALID_ARGUMENT with reason API_KEY_INVALID
            400 if body.contains("API_KEY_INVALID") => {
                ProviderError::Unauthorized { status, message }
            }
            429 => ProviderError::RateLimited(message),
            400..=499 => ProviderError::BadRequest { status, message },
            _ => ProviderError::Upstream { status, message },
        }
    }

    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited(_)
                | ProviderError::Upstream { .. }
                | ProviderError::Transport(_)
                | ProviderError::Timeout(_)
        )
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Unauthorized { .. } => "unauthorized",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::BadRequest { .. } => "bad_request",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Transport(_) => "transport",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Blocked(_) => "blocked",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Inline binary input (base64) attached to a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    pub data: String,
}

/// One structured-generation request: prompt text, optional media, and the
/// JSON schema the reply must follow
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub media: Vec<InlineMedia>,
    pub response_schema: serde_json::Value,
    pub temperature: Option<f32>,
    /// Turn off the provider's own harm filters, for prompts that must read harmful text
    pub relaxed_safety: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            media: Vec::new(),
            response_schema,
            temperature: None,
            relaxed_safety: false,
        }
    }

    pub fn with_media(mut self, media: InlineMedia) -> Self {
        self.media.push(media);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_relaxed_safety(mut self) -> Self {
        self.relaxed_safety = true;
        self
    }
}

// ============================================
// Model Provider Trait
// ============================================

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Run a generation and return the model's raw text reply
    async fn generate(
        &self,
        credential: &ApiCredential,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError>;

    /// Provider name
    fn name(&self) -> &str;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;
}

/// Generate and deserialize a JSON reply
pub async fn generate_structured<T: DeserializeOwned>(
    provider: &dyn ModelProvider,
    credential: &ApiCredential,
    request: &GenerationRequest,
) -> Result<T, ProviderError> {
    let text = provider.generate(credential, request).await?;
    parse_structured(&text).map_err(|e| {
        warn!(provider = provider.name(), error = %e, "Failed to parse model reply");
        e
    })
}

/// Parse a JSON reply, tolerating Markdown code fences around it
pub fn parse_structured<T: DeserializeOwned>(reply: &str) -> Result<T, ProviderError> {
    let json_str = if reply.contains("```json") {
        reply
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(reply)
    } else if reply.contains("```") {
        reply.split("```").nth(1).unwrap_or(reply)
    } else {
        reply
    };

    serde_json::from_str(json_str.trim())
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON reply: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToxicityVerdict;
    use std::time::Duration;

    #[test]
    fn test_parse_plain_json() {
        let verdict: ToxicityVerdict = parse_structured(r#"{"isToxic": false}"#).unwrap();
        assert!(!verdict.is_toxic);
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"isToxic\": true, \"toxicityReason\": \"insult\"}\n```";
        let verdict: ToxicityVerdict = parse_structured(reply).unwrap();
        assert_eq!(verdict, ToxicityVerdict::toxic("insult"));

        let bare_fence = "```\n{\"isToxic\": false}\n```";
        let verdict: ToxicityVerdict = parse_structured(bare_fence).unwrap();
        assert!(!verdict.is_toxic);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let result: Result<ToxicityVerdict, _> = parse_structured("The text looks fine to me.");
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ProviderError::from_status(403, "denied"),
            ProviderError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(400, r#"{"error":{"details":[{"reason":"API_KEY_INVALID"}]}}"#),
            ProviderError::Unauthorized { status: 400, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad schema"),
            ProviderError::BadRequest { status: 400, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(429, "slow down"),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(
            ProviderError::from_status(503, "overloaded"),
            ProviderError::Upstream { status: 503, .. }
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(ProviderError::from_status(500, "").is_transient());
        assert!(ProviderError::from_status(429, "").is_transient());
        assert!(ProviderError::Timeout(TimeoutError(Duration::from_secs(1))).is_transient());
        assert!(!ProviderError::from_status(401, "").is_transient());
        assert!(!ProviderError::Blocked("SAFETY".to_string()).is_transient());
        assert!(!ProviderError::MalformedResponse("x".to_string()).is_transient());
    }
}
