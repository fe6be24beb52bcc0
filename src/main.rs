//! Liveness ping server.
//!
//! Answers "is host H reachable right now?" for batches of hosts, backed by
//! a cache that is refreshed both on demand and by a background sweep.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────────────┐
//!                  │                      PING SERVER                       │
//!                  │                                                        │
//!   GET /ping      │  ┌─────────┐   ┌──────────┐   ┌────────────────────┐   │
//!  ────────────────┼─▶│  http   │──▶│ security │──▶│     dispatch       │   │
//!                  │  │ server  │   │  tokens  │   │ one task per host  │   │
//!                  │  └─────────┘   └──────────┘   └─────────┬──────────┘   │
//!                  │                                   hit │  │ miss        │
//!                  │                                       ▼  ▼             │
//!                  │  ┌──────────────┐           ┌──────────────────────┐   │
//!                  │  │   refresh    │──────────▶│     cache store      │   │
//!                  │  │ ticker sweep │           │  (sharded, no I/O)   │   │
//!                  │  └──────┬───────┘           └──────────────────────┘   │
//!                  │         │                             ▲                │
//!                  │         ▼                             │                │
//!                  │  ┌──────────────────────────────────────────────────┐  │
//!                  │  │  probe (icmp | tcp) inside resilience timeout     │──┼──▶ target hosts
//!                  │  └──────────────────────────────────────────────────┘  │
//!                  │                                                        │
//!                  │  config · lifecycle · observability · admin (/debug)   │
//!                  └───────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;

use ping_server::config::load_config;
use ping_server::http::HttpServer;
use ping_server::lifecycle::{signals, startup, Shutdown};
use ping_server::observability::{logging, metrics};
use ping_server::probe::build_prober;
use ping_server::security::ApiTokens;

#[derive(Parser)]
#[command(name = "ping-server", version, about = "Cached liveness probing over HTTP")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability);
    tracing::info!("ping-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.api.bind_address,
        probe_method = ?config.probe.method,
        auto_refresh_interval_secs = config.ping.auto_refresh_interval_secs,
        cache_valid_secs = config.ping.cache_valid_secs,
        cache_ttl_secs = config.ping.cache_ttl_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let tokens = ApiTokens::load(Path::new(&config.api.tokens_path))?;

    let prober = build_prober(&config.probe);
    startup::run_self_check(
        prober.as_ref(),
        &config.probe.self_check,
        config.probe.fail_on_self_check,
    )
    .await?;

    let listener = TcpListener::bind(&config.api.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    HttpServer::new(config, tokens, prober)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
