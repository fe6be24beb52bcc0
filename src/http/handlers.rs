//! `/ping` request handling.
//!
//! `GET /ping?addr=<host>&addr=<host>[&cache=false]` answers with a JSON
//! array, one object per `addr` in request order.

use axum::{
    extract::{RawQuery, State},
    Json,
};

use crate::dispatch::PingResult;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query parameters of a `/ping` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingParams {
    pub hosts: Vec<String>,
    pub use_cache: bool,
}

impl PingParams {
    /// Parse a raw query string. `addr` may repeat; only the first `cache`
    /// value counts.
    pub fn parse(query: &str) -> Self {
        let mut hosts = Vec::new();
        let mut cache = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "addr" => hosts.push(value.into_owned()),
                "cache" if cache.is_none() => cache = Some(value.into_owned()),
                _ => {}
            }
        }

        let use_cache = !matches!(
            cache.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("false" | "0" | "no")
        );
        Self { hosts, use_cache }
    }
}

pub async fn ping_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<PingResult>>, ApiError> {
    let params = PingParams::parse(query.as_deref().unwrap_or_default());

    match state.dispatcher.resolve(&params.hosts, params.use_cache).await {
        Ok(results) => {
            metrics::record_request("ok", results.len());
            Ok(Json(results))
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected ping request");
            metrics::record_request("rejected", params.hosts.len());
            Err(e.into())
        }
    }
}
