//! Gemini client against a local mock of the generateContent endpoint

use resilience::{RetryConfig, ServiceConfig};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parenting_service::models::ApiCredential;
use parenting_service::providers::{GenerationRequest, ModelProvider, ProviderError};
use parenting_service::services::{LlmToxicityClassifier, ToxicityClassifier};
use parenting_service::GeminiProvider;

const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn fast_policy(max_retries: u32, timeout: Duration) -> ServiceConfig {
    ServiceConfig::new(
        timeout,
        RetryConfig {
            max_retries,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(50),
            jitter: false,
            ..Default::default()
        },
    )
}

fn provider(server: &MockServer, policy: ServiceConfig) -> GeminiProvider {
    GeminiProvider::new(server.uri(), "gemini-2.0-flash", policy).unwrap()
}

fn credential() -> ApiCredential {
    ApiCredential::new("test-key").unwrap()
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
}

fn request() -> GenerationRequest {
    GenerationRequest::new("Say hello", json!({"type": "OBJECT"}))
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(reply(r#"{"greeting":"hello"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(2, Duration::from_secs(2)));
    let text = provider.generate(&credential(), &request()).await.unwrap();

    assert_eq!(text, r#"{"greeting":"hello"}"#);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(2, Duration::from_secs(2)));
    let text = provider.generate(&credential(), &request()).await.unwrap();

    assert_eq!(text, r#"{"ok":true}"#);
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{ "reason": "API_KEY_INVALID" }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(3, Duration::from_secs(2)));
    let result = provider.generate(&credential(), &request()).await;

    assert!(matches!(
        result,
        Err(ProviderError::Unauthorized { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_slow_responses_time_out_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply("{}").set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(1, Duration::from_millis(50)));
    let result = provider.generate(&credential(), &request()).await;

    assert!(matches!(result, Err(ProviderError::Timeout(_))));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(2, Duration::from_secs(2)));
    let result = provider.generate(&credential(), &request()).await;

    assert!(matches!(result, Err(ProviderError::Blocked(reason)) if reason == "SAFETY"));
}

#[tokio::test]
async fn test_toxicity_classifier_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.0 }
        })))
        .respond_with(reply(
            "```json\n{\"isToxic\": true, \"toxicityReason\": \"hate speech\"}\n```",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(provider(&server, fast_policy(0, Duration::from_secs(2))));
    let classifier = LlmToxicityClassifier::new(provider);
    let verdict = classifier
        .classify(&credential(), "some hateful text")
        .await
        .unwrap();

    assert!(verdict.is_toxic);
    assert_eq!(verdict.reason_or_fallback(), "hate speech");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["safetySettings"][0]["threshold"], "BLOCK_NONE");
    assert!(body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("some hateful text"));
}
