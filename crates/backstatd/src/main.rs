//! backstatd — the backstat daemon.
//!
//! Single binary that wires the pieces together: the `oc` query client,
//! the reconciliation engine, and the dashboard router.
//!
//! # Usage
//!
//! ```text
//! backstatd --port 8080 --config backstat.toml
//! ```

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use backstat_cluster::OcClient;
use backstat_dashboard::{DashboardState, dashboard_router};
use clap::Parser;
use tracing::info;

use crate::config::BackstatConfig;

#[derive(Parser)]
#[command(name = "backstatd", about = "Backup coverage dashboard daemon")]
struct Cli {
    /// Port to listen on (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Path to backstat.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cluster CLI binary used for queries (overrides the config file).
    #[arg(long)]
    oc_bin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,backstatd=debug,backstat=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = BackstatConfig::load(cli.config.as_deref())?;

    let port = cli.port.unwrap_or(config.server.port);
    let oc_binary = cli.oc_bin.unwrap_or(config.cluster.oc_binary);

    info!(oc = %oc_binary, "cluster query client ready");
    if config.auth.is_some() {
        info!("basic authentication enabled");
    }

    let state = DashboardState {
        client: Arc::new(OcClient::new(oc_binary)),
        storage: config.storage_class,
        auth: config.auth,
    };

    let router = dashboard_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "dashboard starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("backstatd stopped");
    Ok(())
}
