//! Cached probe result and its freshness signals.

use std::time::Duration;
use tokio::time::Instant;

/// Last-known liveness of one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Result of the most recent probe.
    pub alive: bool,
    /// Last client query that touched this host (hit or miss).
    pub last_requested: Instant,
    /// Last background refresh of this host.
    pub last_auto_refreshed: Instant,
}

impl CacheEntry {
    /// Entry for a host that was just probed on behalf of a client.
    pub fn probed(alive: bool, now: Instant) -> Self {
        Self {
            alive,
            last_requested: now,
            last_auto_refreshed: now,
        }
    }

    /// Either signal alone keeps the entry fresh.
    pub fn is_fresh(&self, now: Instant, valid_for: Duration) -> bool {
        now.saturating_duration_since(self.last_requested) < valid_for
            || now.saturating_duration_since(self.last_auto_refreshed) < valid_for
    }

    /// True once no client has asked for the host for longer than `ttl`.
    pub fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_requested) > ttl
    }

    /// Fold a newer write into this entry. The result is last-writer-wins,
    /// timestamps never move backwards.
    pub(crate) fn merge(&mut self, newer: CacheEntry) {
        self.alive = newer.alive;
        self.last_requested = self.last_requested.max(newer.last_requested);
        self.last_auto_refreshed = self.last_auto_refreshed.max(newer.last_auto_refreshed);
    }
}
