use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::time::Instant;

use crate::cache::CacheEntry;
use crate::config::ServerConfig;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub cached_hosts: usize,
    pub uptime_secs: u64,
}

/// One cache entry with its timestamps as ages.
#[derive(Debug, Serialize)]
pub struct CacheEntryView {
    pub alive: bool,
    pub last_requested_secs_ago: u64,
    pub last_auto_refreshed_secs_ago: u64,
}

impl CacheEntryView {
    fn at(entry: &CacheEntry, now: Instant) -> Self {
        Self {
            alive: entry.alive,
            last_requested_secs_ago: now.saturating_duration_since(entry.last_requested).as_secs(),
            last_auto_refreshed_secs_ago: now
                .saturating_duration_since(entry.last_auto_refreshed)
                .as_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DebugSnapshot {
    pub config: ServerConfig,
    pub cache: BTreeMap<String, CacheEntryView>,
    pub tokens: Vec<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        cached_hosts: state.store().len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// Read-only view of config, cache contents and the token set.
pub async fn get_debug(State(state): State<AppState>) -> Json<DebugSnapshot> {
    let now = Instant::now();
    let cache = state
        .store()
        .entries()
        .into_iter()
        .map(|(host, entry)| (host, CacheEntryView::at(&entry, now)))
        .collect();

    Json(DebugSnapshot {
        config: state.config.as_ref().clone(),
        cache,
        tokens: state.tokens.redacted(),
    })
}
