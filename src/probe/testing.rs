//! Scripted probers for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::probe::Prober;

/// Answers from a per-host script and counts every call.
#[derive(Default)]
pub struct ScriptedProber {
    answers: Mutex<HashMap<String, bool>>,
    calls: Mutex<Vec<String>>,
    total: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every probe sleeps `delay` before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set(&self, host: &str, alive: bool) {
        self.answers.lock().unwrap().insert(host.to_string(), alive);
    }

    pub fn calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, host: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|h| *h == host).count()
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, host: &str) -> bool {
        self.total.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(host.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers.lock().unwrap().get(host).copied().unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Panics on every probe of `host`, answers `true` otherwise.
pub struct PanickingProber {
    pub host: &'static str,
}

#[async_trait]
impl Prober for PanickingProber {
    async fn probe(&self, host: &str) -> bool {
        if host == self.host {
            panic!("probe of {host} blew up");
        }
        true
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}
