//! Probe result cache.
//!
//! # Data Flow
//! ```text
//! Dispatcher (client traffic):
//!     touch_if_fresh → hit
//!                    → miss → probe → put
//!
//! Refresher (background):
//!     snapshot_keys → probe each → record_refresh → evict_if_idle
//! ```
//!
//! # Design Decisions
//! - The map is private to `CacheStore`; callers only see copies
//! - Sharded locking (DashMap); no lock is held while probing
//! - Two freshness signals, either one keeps an entry servable
//! - Eviction is keyed only on client activity

pub mod entry;
pub mod store;

pub use entry::CacheEntry;
pub use store::CacheStore;

use std::time::Duration;

/// The slice of configuration the cache core reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Freshness window for serving a cached result.
    pub valid_for: Duration,
    /// Lifetime of an entry without a client request.
    pub ttl: Duration,
}

impl From<&crate::config::PingConfig> for CachePolicy {
    fn from(config: &crate::config::PingConfig) -> Self {
        Self {
            valid_for: config.cache_valid(),
            ttl: config.cache_ttl(),
        }
    }
}
