//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Acquisition (attempts, confidence distribution)
//! - Matching (penalty applications, scorer load lifecycle)
//! - Filtering (hard-filter eliminations)
//! - Provider registries (circuit breaker trips)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Acquisition
// =============================================================================

/// Acquisition attempts total by result.
pub static ACQUISITION_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "quarry_acquisition_attempts_total",
            "Total acquisition attempts",
        ),
        &["result"], // "selected", "no_match", "degraded", "failed"
    )
    .unwrap()
});

/// Best match confidence scores.
pub static MATCH_CONFIDENCE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "quarry_match_confidence",
            "Distribution of best match confidence scores",
        )
        .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95, 1.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Matching
// =============================================================================

/// Heuristic penalties applied to semantic scores.
pub static PENALTIES_APPLIED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "quarry_penalties_applied_total",
        "Total heuristic penalties applied to pair scores",
    )
    .unwrap()
});

/// Scorer load attempts by outcome.
pub static SCORER_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "quarry_scorer_loads_total",
            "Pairwise scorer load attempts",
        ),
        &["outcome"], // "loaded", "failed", "timeout"
    )
    .unwrap()
});

// =============================================================================
// Filtering
// =============================================================================

/// Candidates dropped by hard filters.
pub static HARD_FILTER_ELIMINATIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "quarry_hard_filter_eliminations_total",
        "Candidates eliminated by hard filters",
    )
    .unwrap()
});

// =============================================================================
// Provider registries
// =============================================================================

/// Circuit breaker trips by provider category.
pub static PROVIDER_TRIPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "quarry_provider_trips_total",
            "Providers tripped into cooldown",
        ),
        &["category"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ACQUISITION_ATTEMPTS.clone()),
        Box::new(MATCH_CONFIDENCE.clone()),
        Box::new(PENALTIES_APPLIED.clone()),
        Box::new(SCORER_LOADS.clone()),
        Box::new(HARD_FILTER_ELIMINATIONS.clone()),
        Box::new(PROVIDER_TRIPS.clone()),
    ]
}
