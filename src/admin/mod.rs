//! Diagnostic endpoints.
//!
//! Both routes are read-only and sit behind the same token check as `/ping`.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/debug", get(get_debug))
}
