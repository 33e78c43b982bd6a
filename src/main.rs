//! CORS relay proxy for market-data and exchange APIs.
//!
//! Forwards browser requests onto third-party JSON APIs that lack permissive
//! CORS headers, relaying status and body untouched and attaching a
//! cache-control hint for intermediary CDNs.
//!
//! ```text
//!                      ┌──────────────────────────────────────────┐
//!                      │                 PROXY                     │
//!   Browser request    │  ┌─────────┐   ┌─────────┐   ┌─────────┐ │
//!   ───────────────────┼─▶│  http   │──▶│ routing │──▶│upstream │─┼──▶ Third-party API
//!                      │  │ server  │   │  table  │   │forwarder│ │
//!                      │  └─────────┘   └────┬────┘   └─────────┘ │
//!                      │                     │ no match            │
//!                      │                     ▼                     │
//!                      │               ┌──────────┐                │
//!                      │               │  static  │                │
//!                      │               │  files   │                │
//!                      │               └──────────┘                │
//!                      └──────────────────────────────────────────┘
//! ```
//!
//! Unmatched paths fall through to a local static file surface so the
//! browser client can be served from the same origin during development.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use market_proxy::config::{load_config, ProxyConfig};
use market_proxy::lifecycle::{signals, Shutdown};
use market_proxy::observability::{logging, metrics};
use market_proxy::HttpServer;

/// CORS relay proxy for market-data and exchange APIs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    for route in &config.routes {
        tracing::info!(
            route = %route.name,
            prefix = %route.path_prefix,
            upstream = %route.upstream_base,
            cache = %route.cache.header_value(),
            "Route registered"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
