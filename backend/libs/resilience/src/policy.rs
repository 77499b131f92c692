/// Timeout-per-attempt combined with predicate-gated retry
use crate::presets::ServiceConfig;
use crate::retry::{with_retry_if, RetryError};
use crate::timeout::{with_timeout_result, TimeoutError};
use std::future::Future;

/// Run `f` under `config`: every attempt gets the full timeout budget and a
/// failed attempt is retried only when `should_retry` accepts its error.
///
/// A timed-out attempt surfaces as `E::from(TimeoutError)`, so the predicate
/// decides whether timeouts are retryable.
pub async fn execute<F, Fut, T, E, P>(
    config: &ServiceConfig,
    should_retry: P,
    mut f: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<TimeoutError> + std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let duration = config.timeout.duration;
    with_retry_if(&config.retry, should_retry, move || {
        with_timeout_result(duration, f())
    })
    .await
}
