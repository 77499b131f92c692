//! Google Gemini `generateContent` integration
use async_trait::async_trait;
use reqwest::Client;
use resilience::{policy, RetryError, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::{GenerationRequest, ModelProvider, ProviderError};
use crate::metrics;
use crate::models::ApiCredential;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const PROVIDER_NAME: &str = "gemini";

const HARM_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini REST client with timeout and retry around every call
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    policy: ServiceConfig,
}

// ============================================
// Request types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        let mut parts = vec![Part {
            text: Some(request.prompt.as_str()),
            inline_data: None,
        }];
        parts.extend(request.media.iter().map(|media| Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: &media.mime_type,
                data: &media.data,
            }),
        }));

        let safety_settings = if request.relaxed_safety {
            HARM_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: *category,
                    threshold: "BLOCK_NONE",
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                temperature: request.temperature,
            },
            safety_settings,
        }
    }
}

// ============================================
// Response types
// ============================================

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a client for `model` served at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        policy: ServiceConfig,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            policy,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send_once(
        &self,
        url: &str,
        credential: &ApiCredential,
        body: &GenerateContentRequest<'_>,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", credential.expose())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, error = %text, "Gemini API request failed");
            return Err(ProviderError::from_status(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::MalformedResponse(format!("unexpected response body: {}", e))
        })?;

        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ProviderError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("no candidates returned".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason {
            Some(reason) if matches!(reason.as_str(), "SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT") => {
                Err(ProviderError::Blocked(reason))
            }
            reason => Err(ProviderError::MalformedResponse(format!(
                "empty candidate (finish reason: {})",
                reason.as_deref().unwrap_or("unknown")
            ))),
        };
    }

    Ok(text)
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn generate(
        &self,
        credential: &ApiCredential,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError> {
        let url = self.endpoint();
        let body = GenerateContentRequest::from(request);
        let (url, body) = (url.as_str(), &body);

        debug!(
            model = %self.model,
            media_parts = request.media.len(),
            "Calling Gemini generateContent"
        );

        let start = Instant::now();
        let result = policy::execute(&self.policy, ProviderError::is_transient, move || {
            self.send_once(url, credential, body)
        })
        .await
        .map_err(RetryError::into_inner);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => {
                metrics::observe_model_call(PROVIDER_NAME, "success", elapsed);
                info!(
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Gemini generation complete"
                );
            }
            Err(e) => {
                metrics::observe_model_call(PROVIDER_NAME, e.kind(), elapsed);
            }
        }

        result
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}
