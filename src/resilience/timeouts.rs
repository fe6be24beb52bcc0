//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every probe with a hard deadline
//! - Cancel the probe future cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - A timed-out probe is reported as not alive, like any other failure

use async_trait::async_trait;
use std::time::Duration;
use tokio::time;

use crate::observability::metrics;
use crate::probe::Prober;

/// Bounds the wall-clock time of a wrapped prober.
pub struct TimeoutProber<P> {
    inner: P,
    timeout: Duration,
}

impl<P: Prober> TimeoutProber<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<P: Prober> Prober for TimeoutProber<P> {
    async fn probe(&self, host: &str) -> bool {
        match time::timeout(self.timeout, self.inner.probe(host)).await {
            Ok(alive) => alive,
            Err(_) => {
                tracing::warn!(
                    host = %host,
                    method = self.inner.name(),
                    timeout = ?self.timeout,
                    "Probe timed out"
                );
                metrics::record_probe_timeout(self.inner.name());
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
