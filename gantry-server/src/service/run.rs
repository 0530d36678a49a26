//! Run Service
//!
//! Business logic for triggering runs and reading their status and logs.

use gantry_core::domain::run::{PipelineRun, RunStatus};
use gantry_core::dto::run::{LogsResponse, RunSummary, TriggerResponse, TriggerRun};
use thiserror::Error;

use crate::state::AppState;

/// Service error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("Pipeline ID is required")]
    MissingId,

    #[error("Pipeline not found")]
    NotFound(String),

    #[error("Logs not available for in-progress or failed pipelines")]
    LogsUnavailable { id: String, status: RunStatus },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Register a new run and start its build in the background
pub async fn trigger_run(state: &AppState, req: TriggerRun) -> TriggerResponse {
    let outcome = req.outcome();
    let run = state.runs.create().await;

    tracing::info!("Run {} triggered ({:?})", run.id, outcome);

    state.builds.schedule(run.id.clone(), outcome);

    TriggerResponse::new(run.id)
}

/// Get a run by ID
pub async fn get_run(state: &AppState, id: &str) -> Result<PipelineRun, RunError> {
    state
        .runs
        .find_by_id(id)
        .await
        .ok_or_else(|| RunError::NotFound(id.to_string()))
}

/// Get the logs of a successfully completed run
pub async fn get_logs(state: &AppState, id: &str) -> Result<LogsResponse, RunError> {
    let run = get_run(state, id).await?;

    if run.status != RunStatus::Success {
        return Err(RunError::LogsUnavailable {
            id: run.id,
            status: run.status,
        });
    }

    Ok(LogsResponse {
        logs: run.logs.unwrap_or_default(),
    })
}

/// List all runs, newest first
pub async fn list_runs(state: &AppState) -> Vec<RunSummary> {
    state
        .runs
        .list_all()
        .await
        .iter()
        .map(RunSummary::from)
        .collect()
}

// =============================================================================
// Validation
// =============================================================================

/// Parse the optional `POST /trigger` body
///
/// An empty or whitespace-only body triggers a successful build, whatever its
/// content type.
pub fn parse_trigger_body(body: &[u8]) -> Result<TriggerRun, RunError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TriggerRun::default());
    }

    serde_json::from_slice(body).map_err(|e| RunError::InvalidBody(e.to_string()))
}

/// Require a non-empty `id` query parameter
pub fn validate_id(id: Option<String>) -> Result<String, RunError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(RunError::MissingId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(&Config {
            build_duration: Duration::from_millis(10),
            ..Config::default()
        })
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(
            validate_id(Some("pipeline-1".to_string())),
            Ok("pipeline-1".to_string())
        );
        assert_eq!(validate_id(None), Err(RunError::MissingId));
        assert_eq!(validate_id(Some(String::new())), Err(RunError::MissingId));
        assert_eq!(validate_id(Some("  ".to_string())), Err(RunError::MissingId));
    }

    #[test]
    fn test_parse_trigger_body() {
        assert!(!parse_trigger_body(b"").unwrap().fail);
        assert!(!parse_trigger_body(b" \n\t").unwrap().fail);
        assert!(!parse_trigger_body(b"{}").unwrap().fail);
        assert!(parse_trigger_body(br#"{"fail": true}"#).unwrap().fail);

        assert!(matches!(
            parse_trigger_body(br#"{"fail": "yes"}"#),
            Err(RunError::InvalidBody(_))
        ));
        assert!(matches!(
            parse_trigger_body(b"{not json"),
            Err(RunError::InvalidBody(_))
        ));
    }

    #[tokio::test]
    async fn test_trigger_registers_run() {
        let state = test_state();
        let response = trigger_run(&state, TriggerRun::default()).await;

        assert_eq!(response.message, "Pipeline triggered");
        let run = get_run(&state, &response.id).await.unwrap();
        assert!(!run.status.is_terminal());
    }

    #[tokio::test]
    async fn test_logs_unavailable_until_success() {
        let state = test_state();
        let response = trigger_run(&state, TriggerRun::default()).await;

        assert!(matches!(
            get_logs(&state, &response.id).await,
            Err(RunError::LogsUnavailable { .. })
        ));

        tokio::time::sleep(Duration::from_millis(200)).await;
        let logs = get_logs(&state, &response.id).await.unwrap();
        assert_eq!(logs.logs, "Build completed successfully.");
    }

    #[tokio::test]
    async fn test_logs_unavailable_for_failed_run() {
        let state = test_state();
        let response = trigger_run(&state, TriggerRun { fail: true }).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(
            get_logs(&state, &response.id).await,
            Err(RunError::LogsUnavailable {
                id: response.id.clone(),
                status: RunStatus::Failed,
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_run() {
        let state = test_state();
        assert_eq!(
            get_run(&state, "pipeline-0").await,
            Err(RunError::NotFound("pipeline-0".to_string()))
        );
    }
}
