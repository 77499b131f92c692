/// Preset configurations for common call types
use crate::retry::RetryConfig;
use crate::timeout::TimeoutConfig;
use std::time::Duration;

/// Configuration bundle for a call type
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub timeout: TimeoutConfig,
    pub retry: RetryConfig,
}

impl ServiceConfig {
    pub fn new(timeout: Duration, retry: RetryConfig) -> Self {
        Self {
            timeout: TimeoutConfig { duration: timeout },
            retry,
        }
    }
}

/// Hosted model inference (text and vision generation)
///
/// - Timeout: 30s per attempt (generation latency is long-tailed)
/// - Retry: 2 retries, 250ms initial backoff capped at 4s
pub fn model_inference_config() -> ServiceConfig {
    ServiceConfig {
        timeout: TimeoutConfig {
            duration: Duration::from_secs(30),
        },
        retry: RetryConfig {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(4),
            backoff_multiplier: 2.0,
            jitter: true,
        },
    }
}
