//! TCP connect probe.
//!
//! Host identifiers may carry a port (`example.com:443`, `[2001:db8::1]:22`);
//! anything else is probed on the default port.

use async_trait::async_trait;
use std::net::Ipv6Addr;
use std::time::Instant;
use tokio::net::TcpStream;

use crate::observability::metrics;
use crate::probe::Prober;

pub struct TcpProber {
    default_port: u16,
}

impl TcpProber {
    pub fn new(default_port: u16) -> Self {
        Self { default_port }
    }
}

/// Split a host identifier into host and port.
pub fn split_host_port(target: &str, default_port: u16) -> (&str, u16) {
    if let Some(rest) = target.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port);
            return (host, port);
        }
    }

    // A bare IPv6 literal has several colons and no port.
    if target.parse::<Ipv6Addr>().is_ok() {
        return (target, default_port);
    }

    match target.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host, port),
            Err(_) => (target, default_port),
        },
        None => (target, default_port),
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str) -> bool {
        let start = Instant::now();
        let (addr, port) = split_host_port(host, self.default_port);
        let alive = match TcpStream::connect((addr, port)).await {
            Ok(_stream) => true,
            Err(e) => {
                tracing::debug!(host = %addr, port, error = %e, "TCP probe failed");
                false
            }
        };
        metrics::record_probe(self.name(), alive, start);
        alive
    }

    fn name(&self) -> &'static str {
        "tcp"
    }
}
