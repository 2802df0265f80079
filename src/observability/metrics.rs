//! Metrics collection and exposition.
//!
//! # Metrics
//! - `reflector_requests_total` (counter): requests by endpoint, method, status.
//!   Extension methods share the `OTHER` label
//! - `reflector_request_duration_seconds` (histogram): time to response head
//! - `reflector_stream_objects_total` (counter): streamed objects accepted by the transport
//! - `reflector_stream_abandoned_total` (counter): streams cut short by the client
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so handlers and
//!   tests never need to know whether metrics are enabled
//! - The Prometheus exporter runs its own listener, separate from the service

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Fails when the listener cannot bind or a recorder is already installed.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Label for `method`, bounded to the registered methods.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        Method::CONNECT => "CONNECT",
        Method::TRACE => "TRACE",
        _ => "OTHER",
    }
}

pub fn record_request(endpoint: &'static str, method: &Method, status: u16, start: Instant) {
    counter!(
        "reflector_requests_total",
        "endpoint" => endpoint,
        "method" => method_label(method),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("reflector_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_stream_object() {
    counter!("reflector_stream_objects_total").increment(1);
}

pub fn record_stream_abandoned() {
    counter!("reflector_stream_abandoned_total").increment(1);
}
