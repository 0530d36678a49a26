//! Health and service-info DTOs

use serde::{Deserialize, Serialize};

/// Status reported by a live server
pub const HEALTHY: &str = "healthy";

/// Response to `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub service: String,
    pub version: String,
}

/// Response to `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub runs: RunCounts,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

/// Number of registered runs per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub queued: usize,
    pub in_progress: usize,
    pub success: usize,
    pub failed: usize,
}

impl RunCounts {
    pub fn total(&self) -> usize {
        self.queued + self.in_progress + self.success + self.failed
    }
}
