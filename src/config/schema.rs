//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the ping server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::probe::ProbeMethod;

/// Root configuration for the ping server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Cache and refresh policy.
    pub ping: PingConfig,

    /// Probe primitive selection and hardening.
    pub probe: ProbeConfig,

    /// HTTP API settings.
    pub api: ApiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Cache policy and background refresh settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PingConfig {
    /// Period of the background refresh sweep in seconds.
    pub auto_refresh_interval_secs: u64,

    /// How recent a timestamp must be for a cached result to be served, in seconds.
    pub cache_valid_secs: u64,

    /// How long an entry survives without a client request, in seconds.
    pub cache_ttl_secs: u64,

    /// Maximum probes in flight during one refresh cycle.
    pub refresh_concurrency: usize,

    /// Largest batch accepted by a single `/ping` request.
    pub max_hosts_per_request: usize,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            auto_refresh_interval_secs: 60,
            cache_valid_secs: 300,
            cache_ttl_secs: 3600,
            refresh_concurrency: 64,
            max_hosts_per_request: 256,
        }
    }
}

impl PingConfig {
    pub fn auto_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.auto_refresh_interval_secs)
    }

    pub fn cache_valid(&self) -> Duration {
        Duration::from_secs(self.cache_valid_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Probe primitive configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Which liveness check to run.
    pub method: ProbeMethod,

    /// Hard deadline for a single probe in seconds.
    pub timeout_secs: u64,

    /// Port used by the TCP probe when the host carries none.
    pub tcp_default_port: u16,

    /// Hosts with a known answer, probed once at startup.
    pub self_check: Vec<SelfCheckConfig>,

    /// Abort startup if any self-check disagrees with its expectation.
    pub fail_on_self_check: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            method: ProbeMethod::Icmp,
            timeout_secs: 3,
            tcp_default_port: 80,
            self_check: Vec::new(),
            fail_on_self_check: false,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A startup expectation for one host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelfCheckConfig {
    pub host: String,
    pub expect_alive: bool,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// File holding valid API tokens, one per line.
    pub tokens_path: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tokens_path: "api_tokens.txt".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
