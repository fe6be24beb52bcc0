//! Client-driven resolution.
//!
//! # Data Flow
//! ```text
//! resolve(hosts, use_cache)
//!     → types.rs (validate batch)
//!     → dispatcher.rs (one task per host)
//!         → CacheStore::touch_if_fresh → hit
//!         → Prober::probe → CacheStore::put → miss
//!     → results in input order
//! ```
//!
//! # Design Decisions
//! - Validation is all-or-nothing; no partial work on a rejected batch
//! - Probing happens outside every cache critical section
//! - A failed unit degrades to `alive=false` instead of failing the batch

pub mod dispatcher;
pub mod types;

pub use dispatcher::Dispatcher;
pub use types::{validate_hosts, DispatchError, PingResult};
