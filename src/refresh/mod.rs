//! Background refresh subsystem.
//!
//! # Data Flow
//! ```text
//! Periodic timer (auto_refresh_interval)
//!     → snapshot cache keys
//!     → probe each host (independent tasks, bounded fan-out)
//!     → record_refresh (result + last_auto_refreshed)
//!     → evict_if_idle (last_requested older than TTL)
//! ```
//!
//! # Design Decisions
//! - The only component that removes cache entries
//! - Hosts removed mid-cycle are not recreated
//! - One slow or failing host never delays or aborts the others
//! - Stops on the shared shutdown flag, abandoning a cycle in progress

pub mod refresher;

pub use refresher::{RefreshReport, Refresher};
