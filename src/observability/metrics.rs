//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fixture_requests_total` (counter): requests by route and status
//! - `fixture_request_duration_seconds` (histogram): latency by route
//! - `fixture_echo_bytes_total` (counter): bytes echoed back
//! - `fixture_uploads_total` (counter): uploads by outcome
//!   (`stored`, `failed`, `skipped`)
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!("fixture_requests_total", "route" => route.clone(), "status" => status.to_string())
        .increment(1);
    histogram!("fixture_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record bytes written back by the echo fixture.
pub fn record_echo_bytes(len: usize) {
    counter!("fixture_echo_bytes_total").increment(len as u64);
}

/// Record an upload outcome and how long it took to resolve.
pub fn record_upload(outcome: &'static str, start: Instant) {
    counter!("fixture_uploads_total", "outcome" => outcome).increment(1);
    histogram!("fixture_upload_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
