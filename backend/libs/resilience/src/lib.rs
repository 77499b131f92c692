/// Resilience patterns for calls that leave the process
///
/// This library provides the policies wrapped around every hosted-model call:
/// - **Timeout**: Enforces a time limit on each attempt
/// - **Retry**: Exponential backoff with jitter, gated by a caller-supplied predicate
/// - **Policy**: Timeout-per-attempt combined with retry
/// - **Preset Configurations**: Pre-tuned settings for hosted model inference
///
/// # Example: Model call with timeout and retry
///
/// ```rust,no_run
/// use resilience::{policy, presets, TimeoutError};
///
/// #[derive(Debug)]
/// enum CallError {
///     Timeout,
///     Auth,
/// }
///
/// impl std::fmt::Display for CallError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// impl From<TimeoutError> for CallError {
///     fn from(_: TimeoutError) -> Self {
///         CallError::Timeout
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let config = presets::model_inference_config();
///
///     let result = policy::execute(
///         &config,
///         |e: &CallError| matches!(e, CallError::Timeout),
///         || async { Ok::<_, CallError>("verdict") },
///     )
///     .await;
/// }
/// ```

pub mod policy;
pub mod presets;
pub mod retry;
pub mod timeout;

// Re-export main types for convenience
pub use presets::{model_inference_config, ServiceConfig};
pub use retry::{with_retry, with_retry_if, RetryConfig, RetryError};
pub use timeout::{with_timeout, with_timeout_result, TimeoutConfig, TimeoutError};
