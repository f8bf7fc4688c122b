//! Request inspection.
//!
//! # Responsibilities
//! - Extract routing-relevant information (hostname, path)
//! - Read the request ID assigned by the request-id layer
//!
//! # Design Decisions
//! - Hostnames are normalized like a URL parser would: lower-cased, no port
//! - The `Host` header wins; the URI authority covers HTTP/2 requests

use axum::http::{header, Request};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID, or `"unknown"` when none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Normalized hostname the request was addressed to.
pub fn request_hostname<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
        .map(normalize_hostname)
        .unwrap_or_default()
}

/// Strip userinfo and port, then lower-case.
pub fn normalize_hostname(authority: &str) -> String {
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = if host.starts_with('[') {
        // IPv6 literal keeps its brackets.
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };
    host.to_ascii_lowercase()
}
