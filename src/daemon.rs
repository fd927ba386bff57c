//! Server daemon for deeplucid
//!
//! Runs the MCP stdio loop alongside the session sweep task and shuts both
//! down when input closes or a termination signal arrives.

use crate::config::Config;
use crate::server::{McpServer, run_stdio};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, info};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the server until stdin closes or SIGINT/SIGTERM is received.
///
/// This function:
/// 1. Builds the session store from the configuration
/// 2. Starts the expiry sweep background task
/// 3. Serves JSON-RPC on stdio
/// 4. Stops the sweep task on the way out
pub async fn run_server(config: &Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting deeplucid server on stdio"
    );

    let store = SessionStore::new(config.session.enabled, config.store_config());
    info!(
        enabled = config.session.enabled,
        max_sessions = config.session.max_sessions,
        expiry_secs = config.session.expiry_secs,
        "Session store initialized"
    );

    let server = McpServer::new(store.clone()).context("Failed to build tool registry")?;

    let (sweep_handle, sweep_shutdown) = store.start_sweep_task();
    info!(
        interval_secs = config.session.sweep_interval_secs,
        "Session sweep background task started"
    );

    let outcome = tokio::select! {
        result = run_stdio(&server) => result.context("stdio transport failed"),
        _ = wait_for_signal() => Ok(()),
    };

    info!("Signaling sweep task to stop...");
    let _ = sweep_shutdown.send(()).await;

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, sweep_handle).await {
        Ok(Ok(())) => info!("Sweep task completed gracefully"),
        Ok(Err(e)) => error!("Sweep task panicked: {}", e),
        Err(_) => error!("Sweep task did not complete within 5s timeout"),
    }

    info!(sessions = store.count().await, "Server stopped");
    outcome
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    error!("Failed to set up signal handlers: {}", e);
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown..."),
            _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown..."),
        }
    }
    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
