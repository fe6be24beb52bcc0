//! ICMP echo through the system `ping` binary.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::observability::metrics;
use crate::probe::Prober;

pub struct IcmpProber {
    program: String,
    wait: Duration,
}

impl IcmpProber {
    pub fn new(wait: Duration) -> Self {
        Self::with_program("ping", wait)
    }

    /// Use a different executable with the same command line as `ping`.
    pub fn with_program(program: impl Into<String>, wait: Duration) -> Self {
        Self {
            program: program.into(),
            wait,
        }
    }

    fn command(&self, host: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c")
            .arg("1")
            .arg("-W")
            .arg(self.wait.as_secs().max(1).to_string())
            .arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, host: &str) -> bool {
        let start = Instant::now();
        let alive = match self.command(host).status().await {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!(host = %host, program = %self.program, error = %e, "Failed to spawn ping");
                false
            }
        };
        metrics::record_probe(self.name(), alive, start);
        tracing::debug!(host = %host, alive, elapsed = ?start.elapsed(), "ICMP probe finished");
        alive
    }

    fn name(&self) -> &'static str {
        "icmp"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exit_status_decides_liveness() {
        // `true` and `false` ignore the ping arguments and only set the exit status.
        let up = IcmpProber::with_program("true", Duration::from_secs(1));
        let down = IcmpProber::with_program("false", Duration::from_secs(1));
        assert!(up.probe("10.0.0.1").await);
        assert!(!down.probe("10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_missing_binary_is_not_alive() {
        let prober = IcmpProber::with_program("/nonexistent/ping-binary", Duration::from_secs(1));
        assert!(!prober.probe("10.0.0.1").await);
    }
}
