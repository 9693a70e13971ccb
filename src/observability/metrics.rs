//! Metrics collection and exposition.
//!
//! # Metrics
//! - `signal_requests_total` (counter): requests by action, status
//! - `signal_request_duration_seconds` (histogram): latency by action
//! - `signal_store_entries` (gauge): payloads currently held
//!
//! # Design Decisions
//! - Labels use the route action name, never the room id
//! - Exporter is optional; without it the macros record nothing

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(action: &'static str, status: u16, start_time: Instant) {
    counter!(
        "signal_requests_total",
        "action" => action,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("signal_request_duration_seconds", "action" => action)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record the current number of stored payloads.
pub fn record_store_entries(entries: usize) {
    gauge!("signal_store_entries").set(entries as f64);
}
