use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::providers::ModelProvider;
use crate::services::{
    BabyStateAnalyzer, CommunityPostPipeline, CredentialResolver, FeedbackSummarizer,
    InsightGenerator, LlmBabyStateAnalyzer, LlmFeedbackSummarizer, LlmInsightGenerator,
    LlmToxicityClassifier,
};

/// Which model the service talks to, reported by `/api/v1/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub provider: String,
    pub model: String,
}

/// The model-backed collaborators behind each endpoint
#[derive(Clone)]
pub struct AppServices {
    pub post_pipeline: Arc<CommunityPostPipeline>,
    pub insight_generator: Arc<dyn InsightGenerator>,
    pub baby_state_analyzer: Arc<dyn BabyStateAnalyzer>,
    pub feedback_summarizer: Arc<dyn FeedbackSummarizer>,
}

impl AppServices {
    /// Wire every collaborator to one provider
    pub fn from_provider(provider: Arc<dyn ModelProvider>) -> Self {
        let classifier = Arc::new(LlmToxicityClassifier::new(provider.clone()));

        Self {
            post_pipeline: Arc::new(CommunityPostPipeline::new(classifier)),
            insight_generator: Arc::new(LlmInsightGenerator::new(provider.clone())),
            baby_state_analyzer: Arc::new(LlmBabyStateAnalyzer::new(provider.clone())),
            feedback_summarizer: Arc::new(LlmFeedbackSummarizer::new(provider)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: CredentialResolver,
    pub services: AppServices,
    pub model_info: ModelInfo,
}

impl AppState {
    pub fn new(config: Config, services: AppServices, model_info: ModelInfo) -> Self {
        let credentials = CredentialResolver::new(config.server_credential());
        Self {
            config: Arc::new(config),
            credentials,
            services,
            model_info,
        }
    }

    pub fn from_provider(config: Config, provider: Arc<dyn ModelProvider>) -> Self {
        let model_info = ModelInfo {
            provider: provider.name().to_string(),
            model: provider.model().to_string(),
        };
        Self::new(config, AppServices::from_provider(provider), model_info)
    }
}
