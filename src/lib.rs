//! AI provider gateway.
//!
//! A path-based reverse proxy that puts many AI provider APIs behind one
//! origin. `/{provider}/...` is forwarded to the provider's base URL with the
//! provider segment removed, edge headers stripped and a per-request deadline.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
