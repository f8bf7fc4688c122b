//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → route table compiled once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults, including the built-in provider routes
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ClientConfig, CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig,
    RouteConfig, TimeoutConfig, AZURE_ENDPOINT_ENV,
};
pub use validation::{validate_config, ValidationError};
