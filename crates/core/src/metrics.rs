//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Remote catalog requests (count by status, latency)
//! - The movie cache controller (detail cache hits, page navigations)
//! - Favorites persistence

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Remote Catalog Metrics
// =============================================================================

/// Remote catalog requests by endpoint and HTTP status.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marquee_catalog_requests_total",
            "Total requests sent to the remote movie catalog",
        ),
        &["endpoint", "status"], // status: HTTP code or "transport_error"
    )
    .unwrap()
});

/// Remote catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_catalog_request_duration_seconds",
            "Duration of remote catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Movie Cache Metrics
// =============================================================================

/// Movie detail lookups by result.
pub static MOVIE_CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marquee_movie_cache_lookups_total",
            "Movie detail lookups served by the cache controller",
        ),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

/// Page navigations by listing and outcome.
pub static LISTING_NAVIGATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marquee_listing_navigations_total",
            "Page navigation requests on paginated listings",
        ),
        &["listing", "outcome"], // outcome: "fetched", "busy", "out_of_range", "no_query", "failed"
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics
// =============================================================================

/// Favorites mutations by operation and result.
pub static FAVORITES_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marquee_favorites_operations_total",
            "Favorites add/remove operations",
        ),
        &["operation", "result"], // operation: "add", "remove"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(MOVIE_CACHE_LOOKUPS.clone()),
        Box::new(LISTING_NAVIGATIONS.clone()),
        Box::new(FAVORITES_OPERATIONS.clone()),
    ]
}
