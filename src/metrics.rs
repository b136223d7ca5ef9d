//! Prometheus metrics for request tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Rejected greeting requests counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "validation_failures_total";
/// Greetings served counter metric name.
pub const METRIC_GREETINGS_SERVED: &str = "greetings_served_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests by route and status"
    );
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of greeting requests rejected by validation"
    );
    describe_counter!(
        METRIC_GREETINGS_SERVED,
        "Total number of greetings served by kind"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record a completed HTTP request.
pub fn record_http_request(start: Instant, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment validation failures counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

/// Increment greetings served counter.
pub fn inc_greetings_served(kind: &'static str) {
    counter!(METRIC_GREETINGS_SERVED, "kind" => kind).increment(1);
}
