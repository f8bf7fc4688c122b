//! Route dispatch: resolve, rewrite, sanitize, forward.
//!
//! # Data Flow
//! ```text
//! Request
//!     → RouteTable::resolve (path prefix or hostname alias)
//!     → no match: hand the request back to the caller (falls through to 404)
//!     → upstream URL (prefix stripped, query kept)
//!     → security::headers::sanitize
//!     → resilience::timeouts::forward_with_timeout
//!     → relayed response or 504
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, HttpBody},
    http::Request,
    response::Response,
};
use url::Url;

use crate::error::ProxyError;
use crate::http::request::{request_hostname, request_id};
use crate::observability::metrics;
use crate::resilience::timeouts::{forward_with_timeout, Forwarded};
use crate::routing::{RequestTarget, RouteEntry, RouteTable};
use crate::security::headers::{sanitize, strip_hop_by_hop};

/// Result of offering a request to the dispatcher.
pub enum Dispatch {
    /// A route claimed the request and produced a response.
    Forwarded(Response),
    /// No route matched; the request is returned untouched.
    NoMatch(Request<Body>),
}

/// Forwards requests to the upstream of the first matching route.
#[derive(Debug)]
pub struct ProxyDispatcher {
    routes: Arc<RouteTable>,
    client: reqwest::Client,
    timeout: Duration,
}

impl ProxyDispatcher {
    pub fn new(routes: Arc<RouteTable>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            routes,
            client,
            timeout,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Offer a request to the route table.
    pub async fn dispatch(&self, request: Request<Body>) -> Result<Dispatch, ProxyError> {
        let hostname = request_hostname(&request);
        let target = RequestTarget::new(request.uri().path(), &hostname);
        let Some(route) = self.routes.resolve(&target) else {
            return Ok(Dispatch::NoMatch(request));
        };

        let start = Instant::now();
        let method = request.method().to_string();
        tracing::debug!(
            request_id = %request_id(&request),
            route = %route.path_segment(),
            method = %method,
            path = %request.uri().path(),
            "Proxying request"
        );

        let segment = route.path_segment();
        let result = self.forward(route, request).await;
        match &result {
            Ok(Forwarded::Upstream(response)) => {
                metrics::record_request(segment, &method, response.status().as_u16(), start);
            }
            Ok(Forwarded::TimedOut) => {
                metrics::record_timeout(segment);
                metrics::record_request(segment, &method, 504, start);
            }
            Err(e) => {
                if matches!(e, ProxyError::Upstream(_)) {
                    metrics::record_upstream_error(segment);
                }
                metrics::record_request(segment, &method, e.status_code().as_u16(), start);
            }
        }

        result.map(|forwarded| Dispatch::Forwarded(forwarded.into_response()))
    }

    async fn forward(
        &self,
        route: &RouteEntry,
        request: Request<Body>,
    ) -> Result<Forwarded, ProxyError> {
        let not_configured = || ProxyError::RouteNotConfigured {
            segment: route.path_segment().to_string(),
        };
        let upstream_hostname = route.upstream_hostname().ok_or_else(not_configured)?;
        let url = route
            .upstream_url(request.uri().path(), request.uri().query())
            .ok_or_else(not_configured)?;
        let url =
            Url::parse(&url).map_err(|source| ProxyError::InvalidUpstreamUrl { url, source })?;

        let outbound = build_outbound(request, url, |headers| sanitize(headers, upstream_hostname));
        forward_with_timeout(&self.client, outbound, self.timeout).await
    }
}

/// Build the outbound request, streaming the inbound body.
///
/// `headers` maps the inbound header set to the outbound one; hop-by-hop
/// headers are removed afterwards.
pub(crate) fn build_outbound(
    request: Request<Body>,
    url: Url,
    headers: impl FnOnce(&axum::http::HeaderMap) -> axum::http::HeaderMap,
) -> reqwest::Request {
    let (parts, body) = request.into_parts();

    let mut outbound = reqwest::Request::new(parts.method, url);
    let mut outbound_headers = headers(&parts.headers);
    strip_hop_by_hop(&mut outbound_headers);
    *outbound.headers_mut() = outbound_headers;

    if !body.is_end_stream() {
        *outbound.body_mut() = Some(reqwest::Body::wrap_stream(body.into_data_stream()));
    }
    outbound
}
