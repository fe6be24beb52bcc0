//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (token auth, timeout, tracing)
//! - Own the cache store, dispatcher and refresher
//! - Start the refresher and stop it together with the server

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::cache::{CachePolicy, CacheStore};
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::http::handlers::ping_handler;
use crate::lifecycle::shutdown;
use crate::probe::Prober;
use crate::refresh::Refresher;
use crate::security::{token_auth_middleware, ApiTokens};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub dispatcher: Dispatcher,
    pub tokens: Arc<ApiTokens>,
    pub started_at: Instant,
}

impl AppState {
    pub fn store(&self) -> &Arc<CacheStore> {
        self.dispatcher.store()
    }
}

/// HTTP front end of the ping server.
pub struct HttpServer {
    router: Router,
    state: AppState,
    refresher: Refresher,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, tokens: ApiTokens, prober: Arc<dyn Prober>) -> Self {
        let store = Arc::new(CacheStore::new());
        let policy = CachePolicy::from(&config.ping);

        let dispatcher = Dispatcher::new(
            store.clone(),
            prober.clone(),
            policy,
            config.ping.max_hosts_per_request,
        );
        let refresher = Refresher::new(
            store,
            prober,
            policy,
            config.ping.auto_refresh_interval(),
            config.ping.refresh_concurrency,
        );

        let state = AppState {
            config: Arc::new(config),
            dispatcher,
            tokens: Arc::new(tokens),
            started_at: Instant::now(),
        };
        let router = Self::build_router(state.clone());

        Self {
            router,
            state,
            refresher,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let auth = middleware::from_fn_with_state(state.tokens.clone(), token_auth_middleware);
        let request_timeout = Duration::from_secs(state.config.api.request_timeout_secs);

        Router::new()
            .route("/ping", get(ping_handler))
            .route("/ping/", get(ping_handler))
            .merge(admin::router())
            .route_layer(auth)
            .route("/healthz", get(|| async { "ok" }))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Router with all state attached, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server and the cache refresher until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let refresher = tokio::spawn(self.refresher.run(shutdown.clone()));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        if let Err(e) = refresher.await {
            tracing::error!(error = %e, "Cache refresher terminated abnormally");
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
