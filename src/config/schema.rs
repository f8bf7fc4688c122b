//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resilience::timeouts::DEFAULT_UPSTREAM_TIMEOUT;

/// Environment variable holding the Azure OpenAI endpoint.
pub const AZURE_ENDPOINT_ENV: &str = "YOUR_AZURE_ENDPOINT";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered route table. Declaration order is match order.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Outbound HTTP client settings.
    pub client: ClientConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            timeouts: TimeoutConfig::default(),
            client: ClientConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single route binding a path segment (and optionally a hostname) to an upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path segment without surrounding slashes, matched as `/{segment}/`.
    pub path_segment: String,

    /// Upstream base URL.
    #[serde(default)]
    pub target: Option<String>,

    /// Environment variable consulted when `target` is unset.
    #[serde(default)]
    pub target_env: Option<String>,

    /// Requests for this hostname match regardless of path.
    #[serde(default)]
    pub hostname_alias: Option<String>,
}

impl RouteConfig {
    /// Route with a fixed upstream target.
    pub fn new(path_segment: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path_segment: path_segment.into(),
            target: Some(target.into()),
            target_env: None,
            hostname_alias: None,
        }
    }

    /// Route whose target is read from an environment variable.
    pub fn from_env(path_segment: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            path_segment: path_segment.into(),
            target: None,
            target_env: Some(variable.into()),
            hostname_alias: None,
        }
    }

    /// Also match requests addressed to `hostname`.
    pub fn with_hostname_alias(mut self, hostname: impl Into<String>) -> Self {
        self.hostname_alias = Some(hostname.into());
        self
    }

    /// The configured target, falling back to `target_env`.
    ///
    /// Empty values count as unset.
    pub fn resolved_target(&self) -> Option<String> {
        self.target
            .clone()
            .or_else(|| {
                self.target_env
                    .as_deref()
                    .and_then(|name| std::env::var(name).ok())
            })
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// The built-in provider table.
///
/// `openrouter/api` must stay ahead of `openrouter`.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new(
            "generativelanguage",
            "https://generativelanguage.googleapis.com",
        )
        .with_hostname_alias("gooai.chatkit.app"),
        RouteConfig::new("groq", "https://api.groq.com"),
        RouteConfig::new("anthropic", "https://api.anthropic.com"),
        RouteConfig::new("pplx", "https://api.perplexity.ai"),
        RouteConfig::new("openai", "https://api.openai.com"),
        RouteConfig::new("mistral", "https://api.mistral.ai"),
        RouteConfig::new("openrouter/api", "https://openrouter.ai/api"),
        RouteConfig::new("openrouter", "https://openrouter.ai/api"),
        RouteConfig::new("xai", "https://api.x.ai"),
        RouteConfig::new("cerebras", "https://api.cerebras.ai"),
        RouteConfig::new("googleapis-cloudcode-pa", "https://cloudcode-pa.googleapis.com"),
        RouteConfig::new("deepseek", "https://api.deepseek.com"),
        RouteConfig::new("siliconflow", "https://api.siliconflow.cn"),
        RouteConfig::from_env("azure", AZURE_ENDPOINT_ENV),
    ]
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a proxied upstream call to produce response headers, in milliseconds.
    pub upstream_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_ms: DEFAULT_UPSTREAM_TIMEOUT.as_millis() as u64,
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for upstream calls.
    pub use_system_proxy: bool,

    /// How long idle upstream connections are kept, in seconds.
    pub pool_idle_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            use_system_proxy: false,
            pool_idle_timeout_secs: 90,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow cross-origin requests from any origin.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
