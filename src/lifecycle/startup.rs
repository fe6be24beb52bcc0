//! Startup self-check.
//!
//! Probes a few hosts with a known answer before traffic is accepted, so a
//! host without network access or without permission to run `ping` is
//! noticed at boot instead of reporting every target as down.

use crate::config::SelfCheckConfig;
use crate::probe::Prober;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartupError {
    #[error("self-check failed for {host}: expected alive={expected}, observed alive={observed}")]
    SelfCheckFailed {
        host: String,
        expected: bool,
        observed: bool,
    },
}

/// Probe every configured host and compare with its expectation.
///
/// All checks run; mismatches are logged. With `fail_fast` the first
/// mismatch is returned as an error.
pub async fn run_self_check(
    prober: &dyn Prober,
    checks: &[SelfCheckConfig],
    fail_fast: bool,
) -> Result<usize, StartupError> {
    let mut mismatches = Vec::new();

    for check in checks {
        let observed = prober.probe(&check.host).await;
        if observed == check.expect_alive {
            tracing::info!(host = %check.host, alive = observed, "Self-check passed");
        } else {
            tracing::warn!(
                host = %check.host,
                expected = check.expect_alive,
                observed,
                "Self-check mismatch"
            );
            mismatches.push(StartupError::SelfCheckFailed {
                host: check.host.clone(),
                expected: check.expect_alive,
                observed,
            });
        }
    }

    match mismatches.into_iter().next() {
        Some(err) if fail_fast => Err(err),
        _ => Ok(checks.len()),
    }
}
