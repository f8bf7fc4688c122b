//! AI provider gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                      AI PROXY                         │
//!   Client         │  ┌─────────┐   ┌──────────┐   ┌───────────────────┐  │
//!   ──────────────▶│─▶│  axum   │──▶│ dispatch │──▶│ routing (ordered) │  │
//!                  │  │ server  │   └────┬─────┘   └───────────────────┘  │
//!                  │  └─────────┘        │                                 │
//!                  │                     ▼                                 │
//!                  │            ┌─────────────────┐   ┌────────────────┐  │
//!                  │            │ header sanitizer│──▶│ timeout-bounded│──┼──▶ Provider
//!                  │            └─────────────────┘   │   forwarder    │  │     API
//!   ◀──────────────│◀─────────── relayed stream ◀─────└────────────────┘  │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ai_proxy::config::{load_config, ProxyConfig};
use ai_proxy::lifecycle::Shutdown;
use ai_proxy::observability::{logging, metrics};
use ai_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "ai-proxy")]
#[command(about = "Reverse proxy for AI provider APIs", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "AI_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("ai-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        upstream_timeout_ms = config.timeouts.upstream_ms,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;

    if server.config().observability.metrics_enabled {
        let addr = server.config().observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Only OS signals stop the binary; the coordinator is kept alive so its receiver stays open.
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
