//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("self-check host must not be empty")]
    EmptySelfCheckHost,
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let non_zero = [
        ("ping.auto_refresh_interval_secs", config.ping.auto_refresh_interval_secs),
        ("ping.cache_valid_secs", config.ping.cache_valid_secs),
        ("ping.cache_ttl_secs", config.ping.cache_ttl_secs),
        ("ping.refresh_concurrency", config.ping.refresh_concurrency as u64),
        ("ping.max_hosts_per_request", config.ping.max_hosts_per_request as u64),
        ("probe.timeout_secs", config.probe.timeout_secs),
        ("probe.tcp_default_port", u64::from(config.probe.tcp_default_port)),
        ("api.request_timeout_secs", config.api.request_timeout_secs),
    ];
    for (field, value) in non_zero {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    if config.api.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "api.bind_address",
            value: config.api.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.probe.self_check.iter().any(|c| c.host.trim().is_empty()) {
        errors.push(ValidationError::EmptySelfCheckHost);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
