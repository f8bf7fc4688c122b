//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging, JSON optional for machine parsing
//! - Request ID flows through the access log
//! - Metrics are cheap and become no-ops without an installed recorder

pub mod logging;
pub mod metrics;
