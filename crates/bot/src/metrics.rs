//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the bot process:
//! - Commands received
//! - Pipelines currently running
//! - Status server requests
//!
//! Core pipeline metrics are registered alongside.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// Bot Metrics
// =============================================================================

/// Commands received by command name.
pub static COMMANDS_RECEIVED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kakaogram_commands_received_total", "Total bot commands received"),
        &["command"],
    )
    .unwrap()
});

/// Pipelines currently running.
pub static PIPELINES_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "kakaogram_pipelines_in_flight",
        "Number of /create requests currently being processed",
    )
    .unwrap()
});

/// Holds one slot of [`PIPELINES_IN_FLIGHT`] until dropped.
///
/// Also released when the request future is cancelled.
pub struct InFlightGuard(());

impl InFlightGuard {
    pub fn acquire() -> Self {
        PIPELINES_IN_FLIGHT.inc();
        Self(())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        PIPELINES_IN_FLIGHT.dec();
    }
}

// =============================================================================
// Status Server Metrics
// =============================================================================

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kakaogram_http_requests_total", "Total status server requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(COMMANDS_RECEIVED.clone()))
        .unwrap();
    registry
        .register(Box::new(PIPELINES_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();

    // Core metrics (pipeline, external services)
    for metric in kakaogram_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
