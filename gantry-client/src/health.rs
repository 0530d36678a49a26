//! Health endpoints

use crate::GantryClient;
use crate::error::Result;
use gantry_core::dto::health::{HealthReport, ServiceInfo};

impl GantryClient {
    /// Fetch the health report, including per-status run counts
    pub async fn health(&self) -> Result<HealthReport> {
        let response = self.client.get(self.url("health")).send().await?;

        self.handle_response(response).await
    }

    /// Fetch static service information
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        let response = self.client.get(self.url("")).send().await?;

        self.handle_response(response).await
    }
}
