//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe of a host:
//!     → timeouts.rs (enforce per-probe deadline)
//!     → primitive (ICMP / TCP)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every probe has a deadline
//! - A slow host only blocks its own unit of work

pub mod timeouts;

pub use timeouts::TimeoutProber;
