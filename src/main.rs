//! The Decor Atlas preview server.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /path ──▶ http ──▶ routing ──▶ views::PageLoader ──▶ content
//!                                                                  │
//!                                              ┌───────────────────┴──────┐
//!                                              ▼                          ▼
//!                                       Ghost Content API         fallback catalog
//!
//!     Cross-cutting: config (TOML + env), observability (tracing, metrics),
//!                    lifecycle (startup, signals, graceful shutdown)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use decor_atlas::config::load_startup_config;
use decor_atlas::lifecycle::{shutdown_on_signal, Shutdown, Site};
use decor_atlas::observability::{logging, metrics};
use decor_atlas::PreviewServer;

#[derive(Parser)]
#[command(name = "decor-atlas")]
#[command(about = "Preview server for The Decor Atlas", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_startup_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "decor-atlas starting");

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

    let site = Site::bootstrap(&config)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    PreviewServer::new(site, &config.server)
        .run(listener, shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
