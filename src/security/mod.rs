//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request:
//!     → headers.rs (drop edge/CDN metadata, rewrite Host)
//!     → headers.rs (strip hop-by-hop headers owned by the transport)
//!     → Pass to forwarder
//! ```
//!
//! # Design Decisions
//! - The intermediary's identity never leaks upstream
//! - Caller-supplied auth and content headers pass through verbatim

pub mod headers;

pub use headers::{sanitize, strip_hop_by_hop};
