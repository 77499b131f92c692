use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::models::{ApiCredential, InsightRequest, InsightResult};
use crate::providers::{generate_structured, GenerationRequest, ModelProvider, ProviderError};
use crate::validators;

const PIPELINE: &str = "insight";

pub const INSIGHT_FAILURE_MESSAGE: &str = "Failed to generate insight. Please try again.";

#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(
        &self,
        credential: &ApiCredential,
        request: &InsightRequest,
    ) -> std::result::Result<InsightResult, ProviderError>;
}

pub struct LlmInsightGenerator {
    provider: Arc<dyn ModelProvider>,
}

impl LlmInsightGenerator {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(request: &InsightRequest) -> String {
        format!(
            r#"You are a warm, practical parenting coach. A parent has told you about their baby and about how they want to parent.

What the baby has been doing:
{activity}

The parent's goals:
{goals}

How the parent describes their parenting style:
{styles}

Give one short insight into what the baby's behaviour may mean, and one concrete recommendation the parent can try that fits their goals and style. Be supportive and avoid medical diagnoses.

Reply with JSON: "insight" (string) and "recommendation" (string)."#,
            activity = request.baby_activity_description,
            goals = request.parenting_goals,
            styles = request.parenting_styles,
        )
    }

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "insight": { "type": "STRING" },
                "recommendation": { "type": "STRING" }
            },
            "required": ["insight", "recommendation"]
        })
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(
        &self,
        credential: &ApiCredential,
        request: &InsightRequest,
    ) -> std::result::Result<InsightResult, ProviderError> {
        let generation =
            GenerationRequest::new(Self::build_prompt(request), Self::response_schema())
                .with_temperature(0.7);

        let result: InsightResult =
            generate_structured(self.provider.as_ref(), credential, &generation).await?;

        if result.insight.trim().is_empty() || result.recommendation.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "insight reply has empty fields".to_string(),
            ));
        }
        Ok(result)
    }
}

/// Validate the request, then ask the generator for an insight
pub async fn get_parenting_insight(
    generator: &dyn InsightGenerator,
    credential: &ApiCredential,
    request: InsightRequest,
) -> Result<InsightResult> {
    let request = request.trimmed();

    if let Err(field_errors) = validators::validate(&request) {
        metrics::record_pipeline_outcome(PIPELINE, "invalid");
        return Err(field_errors.into());
    }

    match generator.generate(credential, &request).await {
        Ok(result) => {
            info!("Parenting insight generated");
            metrics::record_pipeline_outcome(PIPELINE, "succeeded");
            Ok(result)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Insight generation failed");
            metrics::record_pipeline_outcome(PIPELINE, "failed");
            Err(ServiceError::Upstream(INSIGHT_FAILURE_MESSAGE.to_string()))
        }
    }
}
