//! Shared utilities for integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use ping_server::config::ServerConfig;
use ping_server::http::HttpServer;
use ping_server::lifecycle::Shutdown;
use ping_server::probe::Prober;
use ping_server::security::ApiTokens;

pub const TOKEN: &str = "integration-token";

/// Answers from a per-host table (default: down) and counts calls.
#[derive(Default)]
pub struct FakeProber {
    answers: Mutex<HashMap<String, bool>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeProber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, host: &str, alive: bool) {
        self.answers.lock().unwrap().insert(host.to_string(), alive);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, host: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers.lock().unwrap().get(host).copied().unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// Start the full server on an ephemeral port.
pub async fn start_server(config: ServerConfig, prober: Arc<dyn Prober>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, ApiTokens::new([TOKEN]), prober);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
