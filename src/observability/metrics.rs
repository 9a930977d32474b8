//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootstrap_phase_transitions_total` (counter): phases reached, by `phase`
//! - `bootstrap_failures_total` (counter): terminal failures, by `stage`
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - The Prometheus exporter is optional and observational: failing to start
//!   it never blocks startup

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::MetricsSettings;
use crate::lifecycle::Phase;

/// Install the Prometheus exporter when enabled.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(
                metrics_address = %settings.address,
                error = %e,
                "Failed to parse metrics address"
            );
            return;
        }
    };

    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

pub fn record_phase(phase: Phase) {
    metrics::counter!("bootstrap_phase_transitions_total", "phase" => phase.as_str()).increment(1);
}

pub fn record_failure(stage: &'static str) {
    metrics::counter!("bootstrap_failures_total", "stage" => stage).increment(1);
}
