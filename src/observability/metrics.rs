//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests seen by the gateway
//! - `locale_decisions_total` (counter): routing decisions by outcome
//!   (excluded, pass, redirect, rewrite)
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic increments via the metrics facade)
//! - Prometheus exposition is optional and runs on its own address

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const GATEWAY_REQUESTS_TOTAL: &str = "gateway_requests_total";
pub const LOCALE_DECISIONS_TOTAL: &str = "locale_decisions_total";

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one request seen by the gateway.
pub fn record_request() {
    metrics::counter!(GATEWAY_REQUESTS_TOTAL).increment(1);
}

/// Record one locale-routing decision.
pub fn record_decision(decision: &'static str) {
    metrics::counter!(LOCALE_DECISIONS_TOTAL, "decision" => decision).increment(1);
}
