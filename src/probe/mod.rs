//! Liveness probe primitives.
//!
//! # Data Flow
//! ```text
//! ProbeConfig.method
//!     → build_prober()
//!     → IcmpProber | TcpProber
//!     → wrapped in resilience::TimeoutProber
//!     → Arc<dyn Prober> shared by Dispatcher and Refresher
//! ```
//!
//! # Design Decisions
//! - A probe answers only alive / not alive; errors collapse into `false`
//! - Primitives carry no timeout policy of their own beyond the mechanism's
//! - Cancelling a probe future must release its resources (child process, socket)

pub mod icmp;
pub mod tcp;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ProbeConfig;
use crate::resilience::timeouts::TimeoutProber;

pub use icmp::IcmpProber;
pub use tcp::TcpProber;

/// A single liveness check.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `host` once. Unreachable and failed probes both return `false`.
    async fn probe(&self, host: &str) -> bool;

    /// Short label used in logs and metrics.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<P: Prober + ?Sized> Prober for Arc<P> {
    async fn probe(&self, host: &str) -> bool {
        (**self).probe(host).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Supported probe mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// One ICMP echo through the system `ping` binary.
    Icmp,
    /// A TCP connect to `host:port`.
    Tcp,
}

/// Build the configured primitive, already wrapped in the per-probe timeout.
pub fn build_prober(config: &ProbeConfig) -> Arc<dyn Prober> {
    let timeout = config.timeout();
    match config.method {
        ProbeMethod::Icmp => Arc::new(TimeoutProber::new(IcmpProber::new(timeout), timeout)),
        ProbeMethod::Tcp => Arc::new(TimeoutProber::new(
            TcpProber::new(config.tcp_default_port),
            timeout,
        )),
    }
}
