//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the per-request deadline)
//!     → On expiry: synthetic 504, call cancelled
//!     → On transport failure: error returned to the caller's handler
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every proxied call has a deadline
//! - A single attempt is made; there are no retries or circuit breaking

pub mod timeouts;

pub use timeouts::{forward_with_timeout, timeout_response, Forwarded, DEFAULT_UPSTREAM_TIMEOUT};
