//! Error types for the request path.
//!
//! Route resolution and header sanitization never fail. Errors come from
//! misconfigured routes, the arbitrary-URL endpoint's validation, and the
//! outbound call itself.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while handling a single request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The matched route has no upstream target.
    #[error("route `{segment}` has no upstream target configured")]
    RouteNotConfigured { segment: String },

    /// The rewritten upstream URL did not parse.
    #[error("invalid upstream URL `{url}`: {source}")]
    InvalidUpstreamUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The `url` query parameter of the arbitrary-URL endpoint is unusable.
    #[error("invalid `url` query parameter: {reason}")]
    InvalidProxyUrl { reason: String },

    /// The upstream call failed for a reason other than the deadline.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn invalid_proxy_url(reason: impl Into<String>) -> Self {
        Self::InvalidProxyUrl {
            reason: reason.into(),
        }
    }

    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidProxyUrl { .. } => StatusCode::BAD_REQUEST,
            Self::RouteNotConfigured { .. } | Self::InvalidUpstreamUrl { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::InvalidProxyUrl { reason } => (
                status,
                Json(json!({
                    "success": false,
                    "error": {
                        "field": "url",
                        "message": reason,
                    },
                })),
            )
                .into_response(),
            Self::Upstream(e) => {
                tracing::error!(error = %e, "Upstream error");
                (status, "Upstream request failed").into_response()
            }
            other => {
                tracing::error!(error = %other, "Proxy misconfiguration");
                (status, "Internal Server Error").into_response()
            }
        }
    }
}

/// Result type alias using ProxyError.
pub type Result<T> = std::result::Result<T, ProxyError>;
