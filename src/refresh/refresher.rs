//! Background cache refresh.
//!
//! # Responsibilities
//! - Periodically re-probe every cached host
//! - Update results and auto-refresh timestamps
//! - Evict hosts no client has asked for within the TTL

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::cache::{CachePolicy, CacheStore};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::probe::Prober;

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Hosts whose entry was updated.
    pub refreshed: usize,
    /// Hosts removed for inactivity.
    pub evicted: usize,
    /// Hosts that disappeared from the cache while being probed.
    pub vanished: usize,
    /// Hosts whose refresh task failed.
    pub failed: usize,
}

enum HostOutcome {
    Refreshed,
    Evicted,
    Vanished,
}

pub struct Refresher {
    store: Arc<CacheStore>,
    prober: Arc<dyn Prober>,
    policy: CachePolicy,
    interval: Duration,
    concurrency: Arc<Semaphore>,
}

impl Refresher {
    pub fn new(
        store: Arc<CacheStore>,
        prober: Arc<dyn Prober>,
        policy: CachePolicy,
        interval: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            prober,
            policy,
            interval,
            concurrency: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Run cycles every `interval` until shutdown fires.
    ///
    /// Shutdown also cancels a cycle in progress: its per-host tasks are
    /// aborted and their probes dropped.
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval = ?self.interval,
            ttl = ?self.policy.ttl,
            "Cache refresher starting"
        );

        let stopped = shutdown::wait(shutdown);
        tokio::pin!(stopped);

        // First cycle one full period after start.
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stopped => {
                    tracing::info!("Cache refresher received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    tokio::select! {
                        report = self.run_cycle() => tracing::info!(
                            refreshed = report.refreshed,
                            evicted = report.evicted,
                            vanished = report.vanished,
                            failed = report.failed,
                            "Refresh cycle complete"
                        ),
                        _ = &mut stopped => {
                            tracing::info!("Cache refresher received shutdown signal, abandoning cycle");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Refresh every host currently cached, one task per host.
    pub async fn run_cycle(&self) -> RefreshReport {
        let hosts = self.store.snapshot_keys();
        let mut report = RefreshReport::default();
        if hosts.is_empty() {
            return report;
        }

        let mut units = JoinSet::new();
        for host in hosts {
            let store = self.store.clone();
            let prober = self.prober.clone();
            let limit = self.concurrency.clone();
            let ttl = self.policy.ttl;
            units.spawn(async move {
                // The semaphore is owned by this refresher and never closed.
                let _permit = limit.acquire_owned().await.ok();
                refresh_host(&store, prober.as_ref(), &host, ttl).await
            });
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(HostOutcome::Refreshed) => report.refreshed += 1,
                Ok(HostOutcome::Evicted) => {
                    report.refreshed += 1;
                    report.evicted += 1;
                }
                Ok(HostOutcome::Vanished) => report.vanished += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Refresh task failed");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

async fn refresh_host(store: &CacheStore, prober: &dyn Prober, host: &str, ttl: Duration) -> HostOutcome {
    let alive = prober.probe(host).await;
    let now = Instant::now();

    if store.record_refresh(host, alive, now).is_none() {
        return HostOutcome::Vanished;
    }
    tracing::debug!(host = %host, alive, "Auto-refreshed");

    if store.evict_if_idle(host, ttl, now) {
        tracing::info!(host = %host, "Removing host from cache due to inactivity");
        metrics::record_eviction();
        return HostOutcome::Evicted;
    }
    HostOutcome::Refreshed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use crate::lifecycle::Shutdown;
    use crate::probe::testing::{PanickingProber, ScriptedProber};

    const VALID: Duration = Duration::from_secs(300);
    const TTL: Duration = Duration::from_secs(3600);
    const INTERVAL: Duration = Duration::from_secs(60);

    fn refresher(store: Arc<CacheStore>, prober: Arc<dyn Prober>) -> Refresher {
        Refresher::new(
            store,
            prober,
            CachePolicy {
                valid_for: VALID,
                ttl: TTL,
            },
            INTERVAL,
            4,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_updates_result_and_timestamp() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::new());
        let t0 = Instant::now();
        store.put("h", CacheEntry::probed(false, t0));
        prober.set("h", true);

        tokio::time::advance(INTERVAL).await;
        let report = refresher(store.clone(), prober.clone()).run_cycle().await;

        assert_eq!(report, RefreshReport { refreshed: 1, ..Default::default() });
        let entry = store.get("h").unwrap();
        assert!(entry.alive);
        assert_eq!(entry.last_requested, t0);
        assert_eq!(entry.last_auto_refreshed, t0 + INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_entry_evicted_despite_refresh() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::new());
        store.put("idle", CacheEntry::probed(true, Instant::now()));
        let r = refresher(store.clone(), prober.clone());

        // Keep it nominally fresh through refreshes right up to the TTL.
        tokio::time::advance(TTL).await;
        assert_eq!(r.run_cycle().await.evicted, 0);
        assert!(store.get("idle").unwrap().is_fresh(Instant::now(), VALID));

        tokio::time::advance(Duration::from_secs(1)).await;
        let report = r.run_cycle().await;
        assert_eq!(report.evicted, 1);
        assert!(store.get("idle").is_none());
        assert_eq!(prober.calls_for("idle"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requested_entry_survives() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::new());
        store.put("idle", CacheEntry::probed(true, Instant::now()));
        store.put("busy", CacheEntry::probed(true, Instant::now()));

        tokio::time::advance(TTL).await;
        store.put("busy", CacheEntry::probed(true, Instant::now()));
        tokio::time::advance(Duration::from_secs(1)).await;

        let report = refresher(store.clone(), prober).run_cycle().await;
        assert_eq!(report.refreshed, 2);
        assert_eq!(report.evicted, 1);
        assert_eq!(store.snapshot_keys(), vec!["busy".to_string()]);
    }

    #[tokio::test]
    async fn test_deleted_during_probe_is_not_resurrected() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::with_delay(Duration::from_millis(50)));
        store.put("h", CacheEntry::probed(true, Instant::now()));
        let r = refresher(store.clone(), prober);

        let deleter = {
            let store = store.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                store.delete("h");
            })
        };
        let report = r.run_cycle().await;
        deleter.await.unwrap();

        assert_eq!(report.vanished, 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_host_does_not_abort_cycle() {
        let store = Arc::new(CacheStore::new());
        let now = Instant::now();
        for host in ["a", "bad", "c"] {
            store.put(host, CacheEntry::probed(false, now));
        }

        let report = refresher(store.clone(), Arc::new(PanickingProber { host: "bad" }))
            .run_cycle()
            .await;

        assert_eq!(report.refreshed, 2);
        assert_eq!(report.failed, 1);
        assert!(store.get("a").unwrap().alive);
        assert!(store.get("c").unwrap().alive);
        assert!(!store.get("bad").unwrap().alive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_and_stops_on_shutdown() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::new());
        store.put("h", CacheEntry::probed(false, Instant::now()));
        prober.set("h", true);

        let shutdown = Shutdown::new();
        let task = tokio::spawn(refresher(store.clone(), prober.clone()).run(shutdown.subscribe()));

        // Nothing happens before the first full interval.
        tokio::time::sleep(INTERVAL / 2).await;
        assert_eq!(prober.calls(), 0);

        tokio::time::sleep(INTERVAL).await;
        assert_eq!(prober.calls(), 1);
        assert!(store.get("h").unwrap().alive);

        shutdown.trigger();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_cycle_in_progress() {
        let store = Arc::new(CacheStore::new());
        let prober = Arc::new(ScriptedProber::with_delay(Duration::from_secs(3600)));
        store.put("h", CacheEntry::probed(false, Instant::now()));
        prober.set("h", true);

        let shutdown = Shutdown::new();
        let task = tokio::spawn(refresher(store.clone(), prober.clone()).run(shutdown.subscribe()));

        // The first cycle is now stuck in a slow probe.
        tokio::time::sleep(INTERVAL + Duration::from_secs(1)).await;
        assert_eq!(prober.calls(), 1);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("refresher kept running after shutdown")
            .unwrap();
        assert!(!store.get("h").unwrap().alive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_start_is_observed() {
        let prober = Arc::new(ScriptedProber::new());
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        shutdown.trigger();

        tokio::time::timeout(
            Duration::from_secs(1),
            refresher(Arc::new(CacheStore::new()), prober).run(rx),
        )
        .await
        .expect("refresher missed an earlier shutdown");
    }
}
