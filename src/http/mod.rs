//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → GET /                       → welcome.rs
//!     → POST /custom-model-proxy    → custom.rs
//!     → anything else               → dispatch.rs (route table)
//!     → response.rs (relay upstream response, or 404)
//!     → Send to client with X-Accel-Buffering: no
//! ```

pub mod custom;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;
pub mod welcome;

pub use dispatch::{Dispatch, ProxyDispatcher};
pub use request::{request_hostname, request_id, X_REQUEST_ID};
pub use server::{AppState, HttpServer, X_ACCEL_BUFFERING};
