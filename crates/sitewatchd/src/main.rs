//! sitewatchd — the sitewatch daemon.
//!
//! Single binary that opens the state store and serves the dashboard
//! and admin surface over HTTP.
//!
//! # Usage
//!
//! ```text
//! sitewatchd serve --port 8787 --data-dir /var/lib/sitewatch
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "sitewatchd", about = "sitewatch daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard and admin surface.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8787")]
        port: u16,

        /// Data directory for persistent state.
        #[arg(long, default_value = "/var/lib/sitewatch")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sitewatchd=debug,sitewatch=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, data_dir } => serve(port, data_dir).await,
    }
}

async fn serve(port: u16, data_dir: PathBuf) -> anyhow::Result<()> {
    info!("sitewatch daemon starting");

    // Ensure data directory exists.
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("sitewatch.redb");

    let store = sitewatch_state::StateStore::open(&db_path)?;
    info!(path = ?db_path, "state store opened");

    let state = sitewatch_web::AppState::new(store)?;
    let router = sitewatch_web::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("sitewatch daemon stopped");
    Ok(())
}
