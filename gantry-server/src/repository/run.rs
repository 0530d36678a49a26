//! Run Repository
//!
//! In-memory registry of pipeline runs. Every read and write goes through a
//! single async `RwLock`, so handlers and background builds never race on the map.

use std::collections::HashMap;
use std::sync::Arc;

use gantry_core::domain::run::{PipelineRun, RUN_ID_PREFIX, RunStatus};
use gantry_core::dto::health::RunCounts;
use thiserror::Error;
use tokio::sync::RwLock;

/// Repository error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("run {0} not found")]
    NotFound(String),

    #[error("run {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: RunStatus,
        to: RunStatus,
    },
}

#[derive(Debug, Default)]
struct Registry {
    runs: HashMap<String, PipelineRun>,
    /// Nanosecond stamp of the most recently issued id
    last_issued: i64,
}

impl Registry {
    fn next_id(&mut self, now: chrono::DateTime<chrono::Utc>) -> String {
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or(self.last_issued)
            .max(self.last_issued + 1);
        self.last_issued = nanos;
        format!("{}{}", RUN_ID_PREFIX, nanos)
    }

    fn transition(
        &mut self,
        id: &str,
        next: RunStatus,
    ) -> Result<&mut PipelineRun, RepositoryError> {
        let run = self
            .runs
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if !run.status.can_transition_to(next) {
            return Err(RepositoryError::InvalidTransition {
                id: id.to_string(),
                from: run.status,
                to: next,
            });
        }

        run.status = next;
        Ok(run)
    }

    /// Like `transition`, but only towards a terminal status
    fn finish(
        &mut self,
        id: &str,
        status: RunStatus,
    ) -> Result<&mut PipelineRun, RepositoryError> {
        if !status.is_terminal() {
            let from = self
                .runs
                .get(id)
                .map(|run| run.status)
                .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
            return Err(RepositoryError::InvalidTransition {
                id: id.to_string(),
                from,
                to: status,
            });
        }

        self.transition(id, status)
    }
}

/// Shared handle to the run registry
#[derive(Debug, Clone, Default)]
pub struct RunRepository {
    inner: Arc<RwLock<Registry>>,
}

impl RunRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new run in the `Queued` state
    pub async fn create(&self) -> PipelineRun {
        let now = chrono::Utc::now();
        let mut registry = self.inner.write().await;

        let id = registry.next_id(now);
        let run = PipelineRun::queued(id.clone(), now);
        registry.runs.insert(id, run.clone());

        run
    }

    /// Find a run by ID
    pub async fn find_by_id(&self, id: &str) -> Option<PipelineRun> {
        self.inner.read().await.runs.get(id).cloned()
    }

    /// List all runs, most recently triggered first
    pub async fn list_all(&self) -> Vec<PipelineRun> {
        let registry = self.inner.read().await;
        let mut runs: Vec<PipelineRun> = registry.runs.values().cloned().collect();
        runs.sort_by(|a, b| {
            b.triggered_at
                .cmp(&a.triggered_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        runs
    }

    /// Move a queued run to `InProgress`
    pub async fn mark_started(&self, id: &str) -> Result<PipelineRun, RepositoryError> {
        let mut registry = self.inner.write().await;
        let run = registry.transition(id, RunStatus::InProgress)?;
        run.started_at = Some(chrono::Utc::now());
        Ok(run.clone())
    }

    /// Move a running run to its final status and record its logs
    pub async fn mark_finished(
        &self,
        id: &str,
        status: RunStatus,
        logs: String,
    ) -> Result<PipelineRun, RepositoryError> {
        let mut registry = self.inner.write().await;
        let run = registry.finish(id, status)?;
        run.logs = Some(logs);
        run.completed_at = Some(chrono::Utc::now());
        Ok(run.clone())
    }

    /// Count runs per status
    pub async fn counts(&self) -> RunCounts {
        let registry = self.inner.read().await;
        registry
            .runs
            .values()
            .fold(RunCounts::default(), |mut counts, run| {
                match run.status {
                    RunStatus::Queued => counts.queued += 1,
                    RunStatus::InProgress => counts.in_progress += 1,
                    RunStatus::Success => counts.success += 1,
                    RunStatus::Failed => counts.failed += 1,
                }
                counts
            })
    }
}
