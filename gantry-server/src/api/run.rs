//! Run API Handlers
//!
//! HTTP endpoints for triggering runs and polling their progress.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use gantry_core::domain::run::PipelineRun;
use gantry_core::dto::run::{LogsResponse, RunSummary, TriggerResponse, TriggerRun};
use serde::Deserialize;

use crate::api::error::{ALLOW_GET, ALLOW_POST, ApiError, ApiResult};
use crate::service::run_service;
use crate::state::AppState;

/// POST /trigger
/// Trigger a new pipeline run
///
/// The JSON body is optional and its content type is not checked; an empty
/// body triggers a build that succeeds.
pub async fn trigger_run(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<TriggerResponse>> {
    let req: TriggerRun = run_service::parse_trigger_body(&body)?;

    Ok(Json(run_service::trigger_run(&state, req).await))
}

/// GET /status?id=
/// Get the current state of a run
pub async fn get_status(
    State(state): State<AppState>,
    Query(params): Query<RunQuery>,
) -> ApiResult<Json<PipelineRun>> {
    let id = run_service::validate_id(params.id)?;
    tracing::debug!("Getting status of run: {}", id);

    let run = run_service::get_run(&state, &id).await?;

    Ok(Json(run))
}

/// GET /logs?id=
/// Get the logs of a successful run
pub async fn get_logs(
    State(state): State<AppState>,
    Query(params): Query<RunQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let id = run_service::validate_id(params.id)?;
    tracing::debug!("Getting logs of run: {}", id);

    let logs = run_service::get_logs(&state, &id).await?;

    Ok(Json(logs))
}

/// GET /runs
/// List all runs, newest first
pub async fn list_runs(State(state): State<AppState>) -> Json<Vec<RunSummary>> {
    tracing::debug!("Listing all runs");
    Json(run_service::list_runs(&state).await)
}

/// Fallback for read-only paths hit with the wrong method
pub async fn get_only() -> ApiError {
    ApiError::MethodNotAllowed(ALLOW_GET)
}

/// Fallback for `/trigger` hit with the wrong method
pub async fn post_only() -> ApiError {
    ApiError::MethodNotAllowed(ALLOW_POST)
}

#[derive(Debug, Deserialize)]
pub struct RunQuery {
    pub id: Option<String>,
}
