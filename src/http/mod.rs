//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → security::auth (token check)
//!     → handlers.rs (parse addr list, call Dispatcher)
//!     → error.rs (map rejections to status + JSON body)
//!     → JSON response
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
