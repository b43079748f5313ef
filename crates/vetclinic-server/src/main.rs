//! Vet Clinic Server: application entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use vetclinic_db::{DbManager, run_migrations};
use vetclinic_server::{AppState, Cli, create_app};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetclinic=info,tower_http=info".into()),
        )
        .json()
        .init();

    tracing::info!("Starting vet clinic server...");

    let manager = DbManager::connect(&cli.db_config())
        .await
        .context("failed to connect to the database")?;
    run_migrations(&manager.client())
        .await
        .context("failed to apply migrations")?;

    let state = AppState::new(manager.client(), cli.auth_config());
    let app = create_app(state, cli.request_timeout());

    let listener = TcpListener::bind(cli.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", cli.bind_addr()))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    manager.close();
    tracing::info!("Vet clinic server stopped.");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting shutdown"),
    }
}
