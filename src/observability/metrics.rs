//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by outcome
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_sections_missing_total` (counter): section lookups that found nothing
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; no-op until an exporter is installed
//! - Prometheus exporter only when a metrics address is configured

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished relay request.
pub fn record_request(outcome: &'static str, start: Instant) {
    metrics::counter!("relay_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("relay_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a section that was requested but not present.
pub fn record_section_missing(operation: &'static str) {
    metrics::counter!("relay_sections_missing_total", "operation" => operation).increment(1);
}
