/// Prometheus metrics for the parenting service
use lazy_static::lazy_static;
use prometheus::{
    core::Collector, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

lazy_static! {
    /// Service-local registry exposed on `/metrics`
    pub static ref REGISTRY: Registry = Registry::new();

    /// Pipeline results (labels: pipeline=post|insight|baby_state|feedback_summary,
    /// outcome=published|rejected|succeeded|invalid|failed)
    pub static ref PIPELINE_OUTCOMES_TOTAL: CounterVec = register(
        CounterVec::new(
            Opts::new(
                "parenting_pipeline_outcomes_total",
                "Total pipeline invocations by outcome",
            ),
            &["pipeline", "outcome"],
        )
        .expect("valid pipeline outcome metric"),
    );

    /// Hosted model calls (labels: provider, outcome=success|<error kind>)
    pub static ref MODEL_CALLS_TOTAL: CounterVec = register(
        CounterVec::new(
            Opts::new("parenting_model_calls_total", "Total hosted model calls"),
            &["provider", "outcome"],
        )
        .expect("valid model call metric"),
    );

    /// Model call latency in seconds, retries included
    pub static ref MODEL_CALL_DURATION_SECONDS: HistogramVec = register(
        HistogramVec::new(
            HistogramOpts::new(
                "parenting_model_call_duration_seconds",
                "Time spent waiting on the hosted model",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
            &["provider"],
        )
        .expect("valid model latency metric"),
    );
}

fn register<C: Collector + Clone + 'static>(collector: C) -> C {
    REGISTRY
        .register(Box::new(collector.clone()))
        .expect("metric names are unique");
    collector
}

pub fn record_pipeline_outcome(pipeline: &str, outcome: &str) {
    PIPELINE_OUTCOMES_TOTAL
        .with_label_values(&[pipeline, outcome])
        .inc();
}

pub fn observe_model_call(provider: &str, outcome: &str, elapsed: Duration) {
    MODEL_CALLS_TOTAL
        .with_label_values(&[provider, outcome])
        .inc();
    MODEL_CALL_DURATION_SECONDS
        .with_label_values(&[provider])
        .observe(elapsed.as_secs_f64());
}

/// Render all registered metrics in the Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
