//! Metrics collection and exposition.
//!
//! # Metrics
//! - `atlas_route_resolutions_total` (counter): by outcome (matched, not_found)
//! - `atlas_link_activations_total` (counter): by outcome (navigated, deferred, reloaded)
//! - `atlas_content_fetches_total` (counter): by operation and origin
//! - `atlas_stale_pages_discarded_total` (counter)
//! - `atlas_page_load_duration_seconds` (histogram): by view
//! - `atlas_preview_requests_total` (counter): by status

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_route_resolution(matched: bool) {
    let outcome = if matched { "matched" } else { "not_found" };
    metrics::counter!("atlas_route_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_link_activation(outcome: &'static str) {
    metrics::counter!("atlas_link_activations_total", "outcome" => outcome).increment(1);
}

pub fn record_content_fetch(operation: &'static str, origin: &'static str) {
    metrics::counter!(
        "atlas_content_fetches_total",
        "operation" => operation,
        "origin" => origin
    )
    .increment(1);
}

pub fn record_stale_page_discarded() {
    metrics::counter!("atlas_stale_pages_discarded_total").increment(1);
}

pub fn record_page_load(view: &'static str, start: Instant) {
    metrics::histogram!("atlas_page_load_duration_seconds", "view" => view)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_preview_request(status: u16) {
    metrics::counter!("atlas_preview_requests_total", "status" => status.to_string()).increment(1);
}
