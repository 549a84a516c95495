//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Curation and title lookup metrics from the core crate

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autostream_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autostream_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "autostream_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (curation, title lookups)
    for metric in autostream_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Record one completed HTTP request.
pub fn observe_request(method: &str, route: &str, status: u16, elapsed: Duration) {
    let status = status.to_string();
    let labels = [method, route, status.as_str()];
    HTTP_REQUEST_DURATION
        .with_label_values(&labels)
        .observe(elapsed.as_secs_f64());
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        observe_request("GET", "/test", 200, Duration::from_millis(3));

        let output = encode_metrics();
        assert!(output.contains("autostream_http_requests_total"));
        assert!(output.contains("autostream_http_request_duration_seconds_bucket"));
        assert!(output.contains(r#"path="/test""#));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs vectors that have at least one child
        autostream_core::metrics::CURATIONS
            .with_label_values(&["autostream", "single"])
            .inc();
        autostream_core::metrics::DOWNGRADE_DECISIONS
            .with_label_values(&["rejected"])
            .inc();
        autostream_core::metrics::TITLE_LOOKUPS
            .with_label_values(&["mock", "success"])
            .inc();
        HTTP_REQUESTS_IN_FLIGHT.set(0);

        let output = encode_metrics();

        assert!(output.contains("autostream_http_requests_in_flight"));
        assert!(output.contains("autostream_curations_total"));
        assert!(output.contains("autostream_downgrade_decisions_total"));
        assert!(output.contains("autostream_title_lookups_total"));
    }
}
