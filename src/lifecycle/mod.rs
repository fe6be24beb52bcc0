//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Load tokens → Build prober → Self-check → Start server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop flag → refresher exits, server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: config and token errors are fatal
//! - Self-check mismatches are fatal only when configured
//! - The refresher is owned by the server's lifecycle, never detached

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
