//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, CORS, request ID, `X-Accel-Buffering`)
//! - Bind server to listener with graceful shutdown
//! - Dispatch unclaimed requests to the route table

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigError, ProxyConfig};
use crate::http::custom::custom_model_proxy;
use crate::http::dispatch::{Dispatch, ProxyDispatcher};
use crate::http::response::not_found;
use crate::http::welcome::welcome;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::RouteTable;

/// Disables response buffering in nginx-style intermediaries.
pub const X_ACCEL_BUFFERING: &str = "x-accel-buffering";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ProxyDispatcher>,
    pub client: reqwest::Client,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is validated and the route table compiled here.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        crate::config::validate_config(&config).map_err(ConfigError::Validation)?;

        let routes = RouteTable::from_config(&config.routes)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let mut client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(config.client.pool_idle_timeout_secs));
        if !config.client.use_system_proxy {
            client = client.no_proxy();
        }
        let client = client.build()?;

        let dispatcher = ProxyDispatcher::new(
            Arc::new(routes),
            client.clone(),
            Duration::from_millis(config.timeouts.upstream_ms),
        );

        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            client,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Explicit routes fall back to the dispatcher for other methods, the same
    /// as paths without an explicit route.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(welcome).fallback(proxy_handler))
            .route(
                "/custom-model-proxy",
                post(custom_model_proxy).fallback(proxy_handler),
            )
            .fallback(proxy_handler)
            .with_state(state);

        if config.cors.enabled {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(X_ACCEL_BUFFERING),
                HeaderValue::from_static("no"),
            ))
    }

    /// Run the server until a signal or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Offers the request to the route table, falling through to 404.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match state.dispatcher.dispatch(request).await {
        Ok(Dispatch::Forwarded(response)) => response,
        Ok(Dispatch::NoMatch(request)) => {
            tracing::debug!(path = %request.uri().path(), "No route matched");
            not_found()
        }
        Err(e) => e.into_response(),
    }
}
