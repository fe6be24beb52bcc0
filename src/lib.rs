//! Liveness ping server with a shared probe cache.

pub mod admin;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod refresh;
pub mod resilience;
pub mod security;

pub use cache::{CacheEntry, CachePolicy, CacheStore};
pub use config::ServerConfig;
pub use dispatch::{DispatchError, Dispatcher, PingResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use probe::Prober;
pub use refresh::Refresher;
