//! Health Check API Handlers
//!
//! Liveness endpoints for monitoring.

use axum::{Json, extract::State};
use gantry_core::dto::health::{HealthReport, ServiceInfo};

use crate::service::health_service;
use crate::state::AppState;

/// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    Json(health_service::service_info())
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(health_service::health_report(&state).await)
}
