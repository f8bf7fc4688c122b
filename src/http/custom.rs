//! Pass-through to a caller-supplied URL.
//!
//! `POST /custom-model-proxy?url=<absolute URL>` forwards method, headers and
//! body to `url` and relays the response. There is no route lookup, no header
//! sanitization and no deadline.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request},
    response::Response,
};
use serde::Deserialize;
use url::Url;

use crate::error::ProxyError;
use crate::http::dispatch::build_outbound;
use crate::http::response::relay;
use crate::http::server::AppState;

/// Query string of the pass-through endpoint.
#[derive(Debug, Deserialize)]
pub struct CustomProxyQuery {
    pub url: Option<String>,
}

/// Validate the `url` parameter: present, absolute, http(s).
pub fn parse_proxy_url(url: Option<&str>) -> Result<Url, ProxyError> {
    let raw = url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ProxyError::invalid_proxy_url("missing `url` query parameter"))?;
    let url = Url::parse(raw).map_err(|e| ProxyError::invalid_proxy_url(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::invalid_proxy_url(format!(
            "unsupported scheme `{}`",
            url.scheme()
        )));
    }
    Ok(url)
}

pub async fn custom_model_proxy(
    State(state): State<AppState>,
    Query(query): Query<CustomProxyQuery>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let url = parse_proxy_url(query.url.as_deref())?;
    tracing::debug!(url = %url, method = %request.method(), "Forwarding to custom URL");

    // The client derives Host from the URL.
    let outbound = build_outbound(request, url, |headers| {
        let mut headers = headers.clone();
        headers.remove(header::HOST);
        headers
    });
    let upstream = state.client.execute(outbound).await?;
    Ok(relay(upstream))
}
