//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ping_requests_total` (counter): `/ping` requests by outcome
//! - `ping_request_hosts` (histogram): hosts per `/ping` request
//! - `ping_cache_hits_total` / `ping_cache_misses_total` (counter)
//! - `ping_probes_total` (counter): probes by method and result
//! - `ping_probe_timeouts_total` (counter)
//! - `ping_probe_duration_seconds` (histogram)
//! - `ping_refresh_evictions_total` (counter)
//! - `ping_cache_entries` (gauge)
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: &'static str, hosts: usize) {
    counter!("ping_requests_total", "outcome" => outcome).increment(1);
    histogram!("ping_request_hosts").record(hosts as f64);
}

pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("ping_cache_hits_total").increment(1);
    } else {
        counter!("ping_cache_misses_total").increment(1);
    }
}

pub fn record_probe(method: &'static str, alive: bool, start: Instant) {
    let result = if alive { "alive" } else { "dead" };
    counter!("ping_probes_total", "method" => method, "result" => result).increment(1);
    histogram!("ping_probe_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_probe_timeout(method: &'static str) {
    counter!("ping_probe_timeouts_total", "method" => method).increment(1);
}

pub fn record_eviction() {
    counter!("ping_refresh_evictions_total").increment(1);
}

pub fn record_cache_size(size: usize) {
    gauge!("ping_cache_entries").set(size as f64);
}
