//! Concurrency-safe host → entry map.
//!
//! Every operation is atomic with respect to the others and none of them
//! performs I/O, so a shard lock is never held across a probe.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::entry::CacheEntry;
use crate::observability::metrics;

/// The single authority over cached probe results.
#[derive(Debug, Default)]
pub struct CacheStore {
    inner: DashMap<String, CacheEntry>,
}

impl CacheStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the entry for `host`, if any.
    pub fn get(&self, host: &str) -> Option<CacheEntry> {
        self.inner.get(host).map(|r| *r.value())
    }

    /// Write `entry` for `host`.
    ///
    /// An existing entry keeps the later of each timestamp; `alive` is
    /// always taken from `entry`.
    pub fn put(&self, host: &str, entry: CacheEntry) {
        self.inner
            .entry(host.to_string())
            .and_modify(|current| current.merge(entry))
            .or_insert(entry);
        metrics::record_cache_size(self.inner.len());
    }

    /// Remove `host` unconditionally.
    pub fn delete(&self, host: &str) -> Option<CacheEntry> {
        let removed = self.inner.remove(host).map(|(_, entry)| entry);
        metrics::record_cache_size(self.inner.len());
        removed
    }

    /// Copy of all keys, taken without holding any lock afterwards.
    pub fn snapshot_keys(&self) -> Vec<String> {
        self.inner.iter().map(|r| r.key().clone()).collect()
    }

    /// Copy of all entries, for diagnostics.
    pub fn entries(&self) -> Vec<(String, CacheEntry)> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }

    /// Serve a cache hit.
    ///
    /// Returns the entry if it is fresh at `now`, advancing its
    /// `last_requested` in the same critical section. Stale or missing
    /// entries are left untouched.
    pub fn touch_if_fresh(&self, host: &str, now: Instant, valid_for: Duration) -> Option<CacheEntry> {
        let mut r = self.inner.get_mut(host)?;
        let entry = r.value_mut();
        if !entry.is_fresh(now, valid_for) {
            return None;
        }
        entry.last_requested = entry.last_requested.max(now);
        Some(*entry)
    }

    /// Store a background refresh result.
    ///
    /// Only updates a host that is still cached; returns the updated entry.
    pub fn record_refresh(&self, host: &str, alive: bool, now: Instant) -> Option<CacheEntry> {
        self.inner.get_mut(host).map(|mut r| {
            let entry = r.value_mut();
            entry.alive = alive;
            entry.last_auto_refreshed = entry.last_auto_refreshed.max(now);
            *entry
        })
    }

    /// Remove `host` if no client has requested it for longer than `ttl`.
    ///
    /// The check and removal happen under the same shard lock, so a client
    /// request racing with eviction either lands first and keeps the entry,
    /// or lands after and recreates it.
    pub fn evict_if_idle(&self, host: &str, ttl: Duration, now: Instant) -> bool {
        let evicted = self
            .inner
            .remove_if(host, |_, entry| entry.is_idle(now, ttl))
            .is_some();
        if evicted {
            metrics::record_cache_size(self.inner.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
