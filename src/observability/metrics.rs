//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ssr_requests_total` (counter): requests by outcome and status
//! - `ssr_request_duration_seconds` (histogram): latency by outcome
//!
//! # Design Decisions
//! - Labels carry the dispatch outcome, not the raw path, to bound
//!   cardinality
//! - Recording is a no-op until an exporter is installed, so the library
//!   works without the metrics endpoint

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics endpoint"),
    }
}

/// Record one completed request at the dispatch boundary.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    let labels = [
        ("outcome", outcome.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("ssr_requests_total", &labels).increment(1);
    metrics::histogram!("ssr_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
