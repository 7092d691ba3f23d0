// Expense Tracker - Web Server
// REST API over the two JSON document stores

use anyhow::{Context, Result};
use clap::Parser;
use expense_tracker::http::{router, AppState};
use expense_tracker::logging::init_tracing;
use expense_tracker::{LogConfig, StoreConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "expense-server", version, about = "Expense tracker HTTP API")]
struct ServerConfig {
    #[command(flatten)]
    store: StoreConfig,

    #[command(flatten)]
    log: LogConfig,

    /// Address to listen on
    #[arg(long, env = "EXPENSE_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Serve static files from this directory at /
    #[arg(long, env = "EXPENSE_WEB_DIR")]
    web_dir: Option<PathBuf>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_tracing(&config.log.filter);

    let state = AppState::from_config(&config.store);

    // Create both files up front so a bad data dir fails at startup
    config
        .store
        .expense_handler()
        .store()
        .ensure_ready()
        .context("Failed to initialize expenses store")?;
    config
        .store
        .group_handler()
        .store()
        .ensure_ready()
        .context("Failed to initialize groups store")?;

    info!(
        data_dir = %config.store.data_dir.display(),
        id_scheme = config.store.id_scheme.as_str(),
        "stores ready"
    );

    let app = router(state, config.web_dir.clone());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!("Server running on http://{}", config.bind);
    info!("API: http://{}/api/expenses", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
