use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::models::{ApiCredential, BabyState};
use crate::providers::{
    generate_structured, GenerationRequest, InlineMedia, ModelProvider, ProviderError,
};
use crate::validators::{single_field_error, PhotoDataUri};

const PIPELINE: &str = "baby_state";

pub const BABY_STATE_FAILURE_MESSAGE: &str = "Failed to analyze the photo. Please try again.";

const PROMPT: &str = r#"You are a gentle childcare assistant. Look at the attached photo of a baby and assess how the baby is doing right now, based on facial expression, posture, and surroundings.

Work out the baby's mood (for example happy, calm, fussy, sleepy), what the baby is doing (for example sleeping, playing, crying, feeding), and whether the baby is asleep. Then list a few possible needs or observations a parent would find useful, such as "May be hungry" or "Seems comfortable". Keep the tone kind and reassuring, and do not diagnose medical conditions.

Reply with JSON: "mood" (string), "activity" (string), "needs" (array of strings), "isAsleep" (boolean)."#;

#[async_trait]
pub trait BabyStateAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        credential: &ApiCredential,
        photo: &PhotoDataUri,
    ) -> std::result::Result<BabyState, ProviderError>;
}

pub struct LlmBabyStateAnalyzer {
    provider: Arc<dyn ModelProvider>,
}

impl LlmBabyStateAnalyzer {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "mood": { "type": "STRING" },
                "activity": { "type": "STRING" },
                "needs": { "type": "ARRAY", "items": { "type": "STRING" } },
                "isAsleep": { "type": "BOOLEAN" }
            },
            "required": ["mood", "activity", "needs", "isAsleep"]
        })
    }
}

#[async_trait]
impl BabyStateAnalyzer for LlmBabyStateAnalyzer {
    async fn analyze(
        &self,
        credential: &ApiCredential,
        photo: &PhotoDataUri,
    ) -> std::result::Result<BabyState, ProviderError> {
        let generation = GenerationRequest::new(PROMPT, Self::response_schema())
            .with_media(InlineMedia {
                mime_type: photo.mime_type().to_string(),
                data: photo.base64_data().to_string(),
            })
            .with_temperature(0.4);

        generate_structured(self.provider.as_ref(), credential, &generation).await
    }
}

/// Check the photo, then ask the analyzer to describe the baby's state
pub async fn analyze_baby_state(
    analyzer: &dyn BabyStateAnalyzer,
    credential: &ApiCredential,
    photo_data_uri: &str,
    max_photo_bytes: usize,
) -> Result<BabyState> {
    let photo = match PhotoDataUri::parse(photo_data_uri, max_photo_bytes) {
        Ok(photo) => photo,
        Err(e) => {
            metrics::record_pipeline_outcome(PIPELINE, "invalid");
            return Err(single_field_error("photoDataUri", e.to_string()).into());
        }
    };

    match analyzer.analyze(credential, &photo).await {
        Ok(state) => {
            info!(
                mime_type = photo.mime_type(),
                bytes = photo.decoded_len(),
                is_asleep = state.is_asleep,
                "Baby state analyzed"
            );
            metrics::record_pipeline_outcome(PIPELINE, "succeeded");
            Ok(state)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Baby state analysis failed");
            metrics::record_pipeline_outcome(PIPELINE, "failed");
            Err(ServiceError::Upstream(BABY_STATE_FAILURE_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_field() {
        let schema = LlmBabyStateAnalyzer::response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["properties"]["needs"]["items"]["type"], "STRING");
    }
}
