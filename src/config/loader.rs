//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeMethod;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.ping.cache_valid_secs, 300);
        assert_eq!(config.ping.cache_ttl_secs, 3600);
        assert_eq!(config.probe.method, ProbeMethod::Icmp);
        assert_eq!(config.api.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_full_document() {
        let config = parse_config(
            r#"
            [ping]
            auto_refresh_interval_secs = 30
            cache_valid_secs = 120
            cache_ttl_secs = 900

            [probe]
            method = "tcp"
            timeout_secs = 2
            tcp_default_port = 443

            [[probe.self_check]]
            host = "127.0.0.1"
            expect_alive = true

            [api]
            bind_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.ping.auto_refresh_interval_secs, 30);
        assert_eq!(config.ping.cache_valid().as_secs(), 120);
        assert_eq!(config.probe.method, ProbeMethod::Tcp);
        assert_eq!(config.probe.tcp_default_port, 443);
        assert_eq!(config.probe.self_check.len(), 1);
        assert!(config.probe.self_check[0].expect_alive);
        // Unspecified sections keep their defaults.
        assert_eq!(config.ping.max_hosts_per_request, 256);
    }

    #[test]
    fn test_validation_errors_are_collected() {
        let err = parse_config(
            r#"
            [ping]
            auto_refresh_interval_secs = 0
            cache_ttl_secs = 0
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[ping]\ncache_ttl_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
