//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay upstream responses to the caller (status, headers, body stream)
//! - Produce the fixed not-found response for unmatched requests
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Hop-by-hop headers are stripped; everything else is relayed as-is
//! - No recompression and no content-type rewriting

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::security::headers::strip_hop_by_hop;

/// Relay an upstream response without inspecting its body.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Response for requests no handler claimed.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}
