//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, hostname)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: matched RouteEntry or None
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Resolve targets (config value or environment)
//!     → Compile matchers (path prefix OR hostname alias)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use matcher::RequestTarget;
pub use router::{RouteEntry, RouteTable};
