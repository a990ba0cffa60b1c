//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog queries
//! - Catalog mutations by operation and outcome
//! - Fuzzy pattern cache efficiency

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

/// Catalog queries served.
pub static MOVIE_QUERIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("cinedex_movie_queries_total", "Total catalog queries served").unwrap()
});

/// Catalog mutations by operation and outcome.
pub static MOVIE_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinedex_movie_mutations_total", "Total catalog mutations"),
        &["operation", "outcome"], // create/update/delete; ok/not_found/invalid/storage
    )
    .unwrap()
});

/// Fuzzy pattern cache lookups.
pub static PATTERN_CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinedex_pattern_cache_lookups_total",
            "Fuzzy search pattern cache lookups",
        ),
        &["result"], // hit, miss
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(MOVIE_QUERIES_TOTAL.clone()),
        Box::new(MOVIE_MUTATIONS_TOTAL.clone()),
        Box::new(PATTERN_CACHE_LOOKUPS.clone()),
    ]
}
