/// Retry policy with exponential backoff and jitter
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first call
    pub max_retries: u32,
    /// Initial backoff duration
    pub initial_backoff: Duration,
    /// Maximum backoff duration
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to backoff (±30%)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// Every allowed attempt failed with a retryable error
    #[error("Gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: E },
    /// The predicate declined to retry this error
    #[error("Operation failed: {0}")]
    Aborted(E),
}

impl<E> RetryError<E> {
    /// The error produced by the final attempt
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error,
            RetryError::Aborted(e) => e,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }
}

/// Execute a future with retry logic, retrying every error
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, f: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry_if(config, |_| true, f).await
}

/// Execute a future with retry logic, retrying only errors accepted by `should_retry`
pub async fn with_retry_if<F, Fut, T, E, P>(
    config: &RetryConfig,
    should_retry: P,
    mut f: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt: u32 = 0;
    let mut backoff = config.initial_backoff;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;

                if !should_retry(&e) {
                    return Err(RetryError::Aborted(e));
                }

                if attempt > config.max_retries {
                    warn!(
                        attempts = attempt,
                        error = %e,
                        "Max retries ({}) reached", config.max_retries
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                let delay = jittered_delay(backoff, config);

                warn!(
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after transient failure"
                );

                tokio::time::sleep(delay).await;

                backoff = next_backoff(backoff, config);
            }
        }
    }
}

/// Grow the backoff by the configured multiplier, capped at `max_backoff`
pub fn next_backoff(current: Duration, config: &RetryConfig) -> Duration {
    let grown = current.as_millis() as f64 * config.backoff_multiplier;
    Duration::from_millis(grown.min(config.max_backoff.as_millis() as f64) as u64)
}

/// Sleep before the next attempt; jitter never pushes it past `max_backoff`
fn jittered_delay(base: Duration, config: &RetryConfig) -> Duration {
    let delay = if config.jitter {
        let factor = rand::thread_rng().gen_range(0.7..1.3);
        Duration::from_millis((base.as_millis() as f64 * factor) as u64)
    } else {
        base
    };
    delay.min(config.max_backoff)
}
