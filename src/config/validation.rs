//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route segment shape and upstream URLs
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect routes shadowed by an earlier, more general prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Routes without a target are allowed; forwarding through them fails later
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyConfig, RouteConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route #{index} has an empty path segment")]
    EmptySegment { index: usize },

    #[error("route `{segment}` must not start or end with '/'")]
    MalformedSegment { segment: String },

    #[error("route `{segment}` is declared more than once")]
    DuplicateSegment { segment: String },

    #[error("route `{segment}` is unreachable by path: `{shadowed_by}` is declared earlier")]
    ShadowedRoute { segment: String, shadowed_by: String },

    #[error("route `{segment}` has an invalid target `{target}`: {reason}")]
    InvalidTarget {
        segment: String,
        target: String,
        reason: String,
    },

    #[error("invalid bind address `{address}`")]
    InvalidBindAddress { address: String },

    #[error("invalid metrics address `{address}`")]
    InvalidMetricsAddress { address: String },

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a fully deserialized configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            address: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.upstream_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    errors.extend(validate_routes(&config.routes));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the route table in declaration order.
pub fn validate_routes(routes: &[RouteConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, route) in routes.iter().enumerate() {
        let segment = route.path_segment.as_str();
        if segment.is_empty() {
            errors.push(ValidationError::EmptySegment { index });
            continue;
        }
        if segment.starts_with('/') || segment.ends_with('/') {
            errors.push(ValidationError::MalformedSegment {
                segment: segment.to_string(),
            });
            continue;
        }

        for earlier in &routes[..index] {
            let earlier = earlier.path_segment.as_str();
            if earlier == segment {
                errors.push(ValidationError::DuplicateSegment {
                    segment: segment.to_string(),
                });
                break;
            }
            if !earlier.is_empty()
                && segment.len() > earlier.len()
                && segment.starts_with(earlier)
                && segment.as_bytes()[earlier.len()] == b'/'
            {
                errors.push(ValidationError::ShadowedRoute {
                    segment: segment.to_string(),
                    shadowed_by: earlier.to_string(),
                });
                break;
            }
        }

        if let Some(target) = route.resolved_target() {
            if let Err(reason) = check_target(&target) {
                errors.push(ValidationError::InvalidTarget {
                    segment: segment.to_string(),
                    target,
                    reason,
                });
            }
        }
    }

    errors
}

/// Check that a target is an absolute http(s) URL with a host.
pub(crate) fn check_target(target: &str) -> Result<Url, String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ProxyConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.upstream_ms = 0;
        config.routes = vec![
            RouteConfig::new("", "https://a.example"),
            RouteConfig::new("/slashed", "https://b.example"),
            RouteConfig::new("bad", "ftp://c.example"),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptySegment { index: 0 }));
        assert!(matches!(
            errors.last(),
            Some(ValidationError::InvalidTarget { segment, .. }) if segment == "bad"
        ));
    }

    #[test]
    fn test_general_prefix_before_specific_is_rejected() {
        let routes = vec![
            RouteConfig::new("openrouter", "https://openrouter.ai/api"),
            RouteConfig::new("openrouter/api", "https://openrouter.ai/api"),
        ];
        assert_eq!(
            validate_routes(&routes),
            vec![ValidationError::ShadowedRoute {
                segment: "openrouter/api".into(),
                shadowed_by: "openrouter".into(),
            }]
        );
    }

    #[test]
    fn test_sibling_prefixes_do_not_shadow() {
        let routes = vec![
            RouteConfig::new("open", "https://a.example"),
            RouteConfig::new("openai", "https://api.openai.com"),
        ];
        assert!(validate_routes(&routes).is_empty());
    }

    #[test]
    fn test_duplicate_segment() {
        let routes = vec![
            RouteConfig::new("groq", "https://api.groq.com"),
            RouteConfig::new("groq", "https://api.groq.com"),
        ];
        assert_eq!(
            validate_routes(&routes),
            vec![ValidationError::DuplicateSegment { segment: "groq".into() }]
        );
    }

    #[test]
    fn test_missing_target_is_not_an_error() {
        let routes = vec![RouteConfig::from_env("azure", "AI_PROXY_TEST_UNSET_ENDPOINT")];
        assert!(validate_routes(&routes).is_empty());
    }
}
