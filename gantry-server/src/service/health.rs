//! Health Service

use gantry_core::dto::health::{HEALTHY, HealthReport, ServiceInfo};

use crate::state::AppState;

pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static information about the running service
pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: "Gantry pipeline server is running".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    }
}

/// Build a health report including per-status run counts
pub async fn health_report(state: &AppState) -> HealthReport {
    HealthReport {
        status: HEALTHY.to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now(),
        runs: state.runs.counts().await,
    }
}
