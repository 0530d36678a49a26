use anyhow::{Context, Result};
use gantry_server::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gantry server...");

    let config = Config::from_env().context("Invalid server configuration")?;
    tracing::info!(
        "Simulated builds take {:?}, at most {} at once",
        config.build_duration,
        config.max_concurrent_builds
    );

    let state = AppState::new(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!("Listening on {}", config.bind_addr);

    let grace = config.shutdown_grace;
    gantry_server::serve(listener, state, async move {
        gantry_server::shutdown_signal().await;
        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }
    })
    .await
}
