//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Pipeline requests and their outcome
//! - Sticker preparation and upload
//! - External services (emoticon store, Bot API)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Pipeline Metrics
// =============================================================================

/// Pack conversion requests by result.
pub static PACK_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kakaogram_pack_requests_total",
            "Total /create requests handled",
        ),
        &["result"], // "completed", "rejected", "failed"
    )
    .unwrap()
});

/// Pipeline duration in seconds.
pub static PIPELINE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "kakaogram_pipeline_duration_seconds",
            "Duration of a full pack conversion",
        )
        .buckets(vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["result"],
    )
    .unwrap()
});

/// Stickers prepared (downloaded and resized).
pub static STICKERS_PREPARED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "kakaogram_stickers_prepared_total",
        "Total sticker images downloaded and resized",
    )
    .unwrap()
});

/// Sticker uploads by result.
pub static STICKER_UPLOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kakaogram_sticker_uploads_total",
            "Total sticker uploads to the chat platform",
        ),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service requests by service and result.
pub static EXTERNAL_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kakaogram_external_requests_total",
            "Total requests to external services",
        ),
        &["service", "result"],
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PACK_REQUESTS.clone()),
        Box::new(PIPELINE_DURATION.clone()),
        Box::new(STICKERS_PREPARED.clone()),
        Box::new(STICKER_UPLOADS.clone()),
        Box::new(EXTERNAL_REQUESTS.clone()),
    ]
}
