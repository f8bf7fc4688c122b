//! Timeout enforcement for proxied upstream calls.
//!
//! # Responsibilities
//! - Bound each upstream call with a deadline
//! - Cancel the in-flight call when the deadline fires
//! - Turn expiry into a fixed `504 Request timeout` response
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future cancels the call
//! - The deadline covers the wait for response headers. Once they arrive the
//!   body streams for as long as the upstream keeps sending.
//! - Timeout is distinct from transport errors, which are returned unchanged

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;
use crate::http::response::relay;

/// Default deadline for proxied routes.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Body of the synthetic timeout response.
pub const TIMEOUT_BODY: &str = "Request timeout";

/// How a bounded upstream call ended.
pub enum Forwarded {
    /// The upstream produced a response in time.
    Upstream(Response),
    /// The deadline fired first; the call was cancelled.
    TimedOut,
}

impl Forwarded {
    /// Collapse into the response sent to the caller.
    pub fn into_response(self) -> Response {
        match self {
            Self::Upstream(response) => response,
            Self::TimedOut => timeout_response(),
        }
    }
}

/// Execute `request` with a deadline.
pub async fn forward_with_timeout(
    client: &reqwest::Client,
    request: reqwest::Request,
    deadline: Duration,
) -> Result<Forwarded, ProxyError> {
    let url = request.url().clone();

    match tokio::time::timeout(deadline, client.execute(request)).await {
        Ok(Ok(upstream)) => Ok(Forwarded::Upstream(relay(upstream))),
        Ok(Err(e)) => Err(ProxyError::Upstream(e)),
        Err(_) => {
            tracing::warn!(
                url = %url,
                timeout_ms = deadline.as_millis() as u64,
                "Upstream request timed out"
            );
            Ok(Forwarded::TimedOut)
        }
    }
}

/// The fixed response substituted for a timed-out call.
pub fn timeout_response() -> Response {
    (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_BODY).into_response()
}
