//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod run;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service info & health check
        .route("/", get(health::service_info).fallback(run::get_only))
        .route("/health", get(health::health_check).fallback(run::get_only))
        // Run endpoints
        .route("/trigger", post(run::trigger_run).fallback(run::post_only))
        .route("/status", get(run::get_status).fallback(run::get_only))
        .route("/logs", get(run::get_logs).fallback(run::get_only))
        .route("/runs", get(run::list_runs).fallback(run::get_only))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
