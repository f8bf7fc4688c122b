//! Header manipulation for forwarded requests.
//!
//! # Responsibilities
//! - Drop headers injected by CDNs and edge proxies (`cf-*`, `x-forwarded-*`,
//!   `cdn-*`, `x-real-ip`)
//! - Replace `Host` with the upstream's hostname
//! - Strip hop-by-hop headers in both directions
//!
//! # Design Decisions
//! - Header names are compared lower-cased (`HeaderName` already is)
//! - Multi-valued headers are copied value by value, never merged

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Name prefixes added by edge networks in front of the proxy.
const EDGE_HEADER_PREFIXES: &[&str] = &["cf-", "x-forwarded-", "cdn-"];

/// Exact names that never reach the upstream as sent by the caller.
const DROPPED_HEADERS: &[&str] = &["x-real-ip", "host"];

/// Connection-scoped headers owned by each transport hop.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Returns true if the header must not be forwarded upstream.
pub fn is_dropped(name: &HeaderName) -> bool {
    let name = name.as_str();
    EDGE_HEADER_PREFIXES.iter().any(|p| name.starts_with(p)) || DROPPED_HEADERS.contains(&name)
}

/// Build the outbound header set for an upstream at `upstream_hostname`.
pub fn sanitize(inbound: &HeaderMap, upstream_hostname: &str) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());

    for (name, value) in inbound {
        if !is_dropped(name) {
            outbound.append(name.clone(), value.clone());
        }
    }

    if let Ok(host) = HeaderValue::from_str(upstream_hostname) {
        outbound.insert(header::HOST, host);
    }

    outbound
}

/// Remove hop-by-hop headers in place.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }
}
