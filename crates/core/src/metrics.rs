//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Curation (pipeline runs, downgrade decisions, candidate counts)
//! - Title resolution (lookups by result and duration)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Curation Metrics
// =============================================================================

/// Curation runs by sort mode and outcome.
pub static CURATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autostream_curations_total", "Total curation runs"),
        &["mode", "outcome"], // outcome: "empty", "single", "with_fallback", "sorted"
    )
    .unwrap()
});

/// Downgrade evaluations by decision.
pub static DOWNGRADE_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "autostream_downgrade_decisions_total",
            "Downgrade evaluations by decision",
        ),
        &["decision"],
    )
    .unwrap()
});

/// Candidates remaining after deduplication.
pub static CANDIDATES_DEDUPLICATED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "autostream_candidates_deduplicated",
            "Number of candidates left after deduplication",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

// =============================================================================
// Title Resolution Metrics
// =============================================================================

/// Title lookups by resolver and result.
pub static TITLE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autostream_title_lookups_total", "Canonical title lookups"),
        &["resolver", "result"], // result: "success", "error", "timeout"
    )
    .unwrap()
});

/// Title lookup duration in seconds.
pub static TITLE_LOOKUP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autostream_title_lookup_duration_seconds",
            "Duration of canonical title lookups",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["resolver"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Curation
        Box::new(CURATIONS.clone()),
        Box::new(DOWNGRADE_DECISIONS.clone()),
        Box::new(CANDIDATES_DEDUPLICATED.clone()),
        // Title resolution
        Box::new(TITLE_LOOKUPS.clone()),
        Box::new(TITLE_LOOKUP_DURATION.clone()),
    ]
}
