//! Run-related API endpoints

use std::time::Duration;

use crate::GantryClient;
use crate::error::{ClientError, Result};
use gantry_core::domain::run::PipelineRun;
use gantry_core::dto::run::{LogsResponse, RunSummary, TriggerResponse, TriggerRun};
use tokio::time::Instant;

impl GantryClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Trigger a new pipeline run
    ///
    /// # Arguments
    /// * `fail` - Ask the simulated build to fail
    ///
    /// # Returns
    /// The id of the new run
    pub async fn trigger(&self, fail: bool) -> Result<TriggerResponse> {
        let response = self
            .client
            .post(self.url("trigger"))
            .json(&TriggerRun { fail })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current state of a run
    pub async fn status(&self, id: &str) -> Result<PipelineRun> {
        let response = self
            .client
            .get(self.url("status"))
            .query(&[("id", id)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the logs of a run
    ///
    /// The server only serves logs for runs that finished successfully;
    /// anything else comes back as a 400 `ApiError`.
    pub async fn logs(&self, id: &str) -> Result<LogsResponse> {
        let response = self
            .client
            .get(self.url("logs"))
            .query(&[("id", id)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List all runs, newest first
    pub async fn list_runs(&self) -> Result<Vec<RunSummary>> {
        let response = self.client.get(self.url("runs")).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Polling
    // =============================================================================

    /// Poll a run until it reaches a terminal status
    ///
    /// # Arguments
    /// * `id` - The run to wait for
    /// * `poll_interval` - Delay between status requests
    /// * `timeout` - Give up after this long
    pub async fn wait_for_completion(
        &self,
        id: &str,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<PipelineRun> {
        let deadline = Instant::now() + timeout;

        loop {
            let run = self.status(id).await?;
            if run.status.is_terminal() {
                return Ok(run);
            }

            tracing::debug!("Run {} is {}, polling again", id, run.status);

            let now = Instant::now();
            if now >= deadline {
                return Err(ClientError::Timeout {
                    id: id.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }
}
