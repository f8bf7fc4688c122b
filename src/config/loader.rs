//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    let config: ProxyConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, RouteConfig};

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.routes.len(), 14);
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_routes_replace_builtin_table() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [timeouts]
            upstream_ms = 1500

            [observability]
            log_format = "json"

            [[routes]]
            path_segment = "local/v2"
            target = "http://127.0.0.1:9000/v2"

            [[routes]]
            path_segment = "local"
            target = "http://127.0.0.1:9000"
            hostname_alias = "local.test"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeouts.upstream_ms, 1500);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(
            config.routes,
            vec![
                RouteConfig::new("local/v2", "http://127.0.0.1:9000/v2"),
                RouteConfig::new("local", "http://127.0.0.1:9000")
                    .with_hostname_alias("local.test"),
            ]
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = parse_config("[timeouts]\nupstream_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("greater than zero"));

        let err = parse_config("[listener\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/ai-proxy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
