//! Fan-out resolver for client batches.
//!
//! # Responsibilities
//! - Validate the batch before any work starts
//! - Look up every input position before any probe starts
//! - Run one task per cache miss, all started together
//! - Serve fresh cache entries, probe everything else
//! - Reassemble results in input order

use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CachePolicy, CacheStore};
use crate::dispatch::types::{validate_hosts, DispatchError, PingResult};
use crate::observability::metrics;
use crate::probe::Prober;

/// Resolves batches of hosts against the shared cache.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<CacheStore>,
    prober: Arc<dyn Prober>,
    policy: CachePolicy,
    max_hosts: usize,
}

impl Dispatcher {
    pub fn new(
        store: Arc<CacheStore>,
        prober: Arc<dyn Prober>,
        policy: CachePolicy,
        max_hosts: usize,
    ) -> Self {
        Self {
            store,
            prober,
            policy,
            max_hosts,
        }
    }

    /// Probe `hosts`, respecting cache policy.
    ///
    /// The result has one entry per input host in input order; duplicates
    /// are resolved independently. Per-host failures never fail the batch.
    pub async fn resolve(
        &self,
        hosts: &[String],
        use_cache: bool,
    ) -> Result<Vec<PingResult>, DispatchError> {
        validate_hosts(hosts, self.max_hosts)?;

        // Every position is looked up before any probe starts, so duplicates
        // within one batch never observe each other's write-back.
        let mut slots: Vec<Option<PingResult>> = hosts
            .iter()
            .map(|host| self.lookup(host, use_cache))
            .collect();

        let mut units = JoinSet::new();
        for (idx, (slot, host)) in slots.iter().zip(hosts).enumerate() {
            if slot.is_some() {
                continue;
            }
            let unit = self.clone();
            let host = host.clone();
            units.spawn(async move { (idx, unit.probe_one(&host).await) });
        }

        // Units finish out of order; slots are addressed by input position.
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => tracing::error!(error = %e, "Probe task failed"),
            }
        }

        Ok(slots
            .into_iter()
            .zip(hosts)
            .map(|(slot, host)| slot.unwrap_or_else(|| PingResult::new(host.as_str(), false, false)))
            .collect())
    }

    /// Serve `host` from the cache if its entry is fresh. No I/O.
    fn lookup(&self, host: &str, use_cache: bool) -> Option<PingResult> {
        if !use_cache {
            return None;
        }
        let hit = self
            .store
            .touch_if_fresh(host, Instant::now(), self.policy.valid_for);
        metrics::record_cache_lookup(hit.is_some());
        hit.map(|entry| {
            tracing::debug!(host = %host, alive = entry.alive, "Served from cache");
            PingResult::new(host, entry.alive, true)
        })
    }

    async fn probe_one(&self, host: &str) -> PingResult {
        let alive = self.prober.probe(host).await;
        self.store.put(host, CacheEntry::probed(alive, Instant::now()));
        tracing::debug!(host = %host, alive, "Probed");
        PingResult::new(host, alive, false)
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }
}
