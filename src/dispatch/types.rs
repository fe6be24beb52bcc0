//! Dispatcher input validation and result types.

use serde::{Deserialize, Serialize};

/// Longest accepted host identifier (DNS name limit).
pub const MAX_HOST_LEN: usize = 255;

/// Outcome for one input host, in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub ip: String,
    pub alive: bool,
    pub cached: bool,
}

impl PingResult {
    pub fn new(ip: impl Into<String>, alive: bool, cached: bool) -> Self {
        Self {
            ip: ip.into(),
            alive,
            cached,
        }
    }
}

/// Batch-level rejections. Nothing is probed when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("No addresses provided")]
    EmptyBatch,

    #[error("Too many addresses: {count} (max {max})")]
    TooManyHosts { count: usize, max: usize },

    #[error("Invalid address: '{0}'")]
    InvalidHost(String),
}

/// Validate a whole batch before any probe starts.
pub fn validate_hosts(hosts: &[String], max_hosts: usize) -> Result<(), DispatchError> {
    if hosts.is_empty() {
        return Err(DispatchError::EmptyBatch);
    }
    if hosts.len() > max_hosts {
        return Err(DispatchError::TooManyHosts {
            count: hosts.len(),
            max: max_hosts,
        });
    }
    match hosts.iter().find(|h| !is_valid_host(h)) {
        Some(bad) => Err(DispatchError::InvalidHost(bad.clone())),
        None => Ok(()),
    }
}

/// Names, IPv4/IPv6 literals, bracketed IPv6 with port, and zone ids.
/// A leading `-` would be read as an option by the `ping` binary.
fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= MAX_HOST_LEN
        && !host.starts_with('-')
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-' | '_' | '%' | '[' | ']'))
}
