//! chinook-insights - Read-only sales analysis service
//!
//! Connects to a Chinook-style music store database in read-only mode and
//! serves a fixed catalog of sales analyses as JSON over a local HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use chinook_common::{config, db};
use chinook_insights::{build_router, AppState};

/// Command-line arguments for chinook-insights
#[derive(Parser, Debug)]
#[command(name = "chinook-insights")]
#[command(about = "Read-only sales analysis service for a Chinook music store database")]
#[command(version)]
struct Args {
    /// Path to the store database (falls back to CHINOOK_DB, then the
    /// config file, then ./chinook.db)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "CHINOOK_INSIGHTS_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let file_config = config::load_config_file();

    // Initialize tracing subscriber; RUST_LOG wins over the config file
    let default_directive = file_config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_directive)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Chinook Insights v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = config::resolve_database_path(args.database, file_config.as_ref());
    info!("Database path: {}", db_path.display());

    let pool = db::connect_readonly(&db_path)
        .await
        .context("Failed to open store database read-only")?;
    info!("✓ Connected to store (read-only)");

    db::verify_schema(&pool)
        .await
        .context("Store schema verification failed")?;
    info!("✓ Store schema verified");

    let port = config::resolve_port(args.port, file_config.as_ref());
    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("chinook-insights listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
