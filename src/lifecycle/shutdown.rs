//! Shutdown coordination for the ping server.

use tokio::sync::watch;

/// One stop flag that every long-running task listens on.
///
/// The HTTP server and the cache refresher each hold a receiver; a single
/// `trigger` stops both. The flag is sticky: a receiver created or polled
/// after `trigger` still observes it.
#[derive(Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Receiver for a task that must stop on shutdown.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Raise the stop flag.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
        tracing::debug!(listeners = self.tx.receiver_count(), "Shutdown triggered");
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Number of tasks still listening.
    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the stop flag is raised or every sender is gone.
pub async fn wait(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stopped| *stopped).await;
}
