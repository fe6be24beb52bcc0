//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → auth.rs (token from query or bearer header)
//!     → tokens.rs (membership check against the loaded set)
//!     → Pass to handler, or 401
//! ```
//!
//! # Design Decisions
//! - Fail closed: missing and unknown tokens are both rejected
//! - Tokens are never logged; diagnostics only show a redacted form

pub mod auth;
pub mod tokens;

pub use auth::token_auth_middleware;
pub use tokens::{ApiTokens, TokenError};
