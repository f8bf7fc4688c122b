//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ai_proxy_requests_total` (counter): proxied requests by route, method, status
//! - `ai_proxy_request_duration_seconds` (histogram): time to response headers by route
//! - `ai_proxy_upstream_timeouts_total` (counter): deadline expiries by route
//! - `ai_proxy_upstream_errors_total` (counter): transport failures by route

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a proxied request outcome.
pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "ai_proxy_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("ai_proxy_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_timeout(route: &str) {
    metrics::counter!("ai_proxy_upstream_timeouts_total", "route" => route.to_string())
        .increment(1);
}

pub fn record_upstream_error(route: &str) {
    metrics::counter!("ai_proxy_upstream_errors_total", "route" => route.to_string()).increment(1);
}
