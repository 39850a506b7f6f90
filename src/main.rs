//! SWAPI Relay - fetch, cache and print Star Wars API records
//!
//! Starts an HTTP server whose `/api` route runs a processing cycle against the
//! Star Wars API and whose `/stats` route reports cache and request statistics.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swapi_relay::cli::{Cli, StartupConfig};
use swapi_relay::fetch::ResourceFetcher;
use swapi_relay::server;

/// Initializes logging; `RUST_LOG` takes precedence over the debug flag
fn init_tracing(debug_enabled: bool) {
    let default_filter = if debug_enabled {
        "swapi_relay=debug"
    } else {
        "swapi_relay=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.debug_enabled());

    let config = StartupConfig::from_cli(&cli);
    let fetcher = Arc::new(ResourceFetcher::new(config.fetch.clone())?);

    if config.fetch.debug_enabled {
        info!("debug mode enabled");
    }
    info!(timeout_ms = config.fetch.timeout_ms, base_url = %config.fetch.base_url, "fetch layer ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    server::serve(fetcher, addr).await?;

    Ok(())
}
