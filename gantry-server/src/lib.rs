//! Gantry Server
//!
//! Mock CI/CD pipeline-status server. Runs are triggered over HTTP, "built"
//! by a background task after a fixed delay, and polled for status and logs.
//!
//! Architecture:
//! - Repository: in-memory, lock-guarded run registry
//! - Services: run lifecycle, simulated builds, health
//! - API: axum handlers and router

pub mod api;
pub mod config;
pub mod repository;
pub mod service;
pub mod state;

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

pub use config::Config;
pub use state::AppState;

/// Serve the API on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = api::create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server failed")
}

/// Resolves once SIGINT or SIGTERM is received
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Failed to register signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
