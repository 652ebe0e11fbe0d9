//! SSR gateway binary.
//!
//! Loads configuration, initializes observability, wires the dispatch
//! pipeline and serves HTTP until shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use ssr_gateway::app;
use ssr_gateway::config::{load_config, GatewayConfig};
use ssr_gateway::http::{HtmlShell, HttpServer};
use ssr_gateway::observability::{logging, metrics};
use ssr_gateway::render::HtmlRenderer;
use ssr_gateway::Dispatcher;

#[derive(Parser)]
#[command(name = "ssr-gateway", about = "Server-side rendering dispatch gateway")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    let config = config.with_env_mode();
    tracing::info!(
        mode = ?config.mode,
        bind_address = %config.listener.bind_address,
        "ssr-gateway starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(app::route_table()),
        Arc::new(app::preload_resolver()),
        app::reducer(),
        Arc::new(HtmlRenderer),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let server = HttpServer::new(config, dispatcher, Arc::new(HtmlShell));
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
