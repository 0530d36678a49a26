//! Build service
//!
//! Drives the background lifecycle of a triggered run:
//! - Waiting for a free build slot (the run stays `Queued`)
//! - Marking the run `InProgress`
//! - Running the build through a `BuildExecutor`
//! - Recording the final status and logs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gantry_core::domain::run::{RunOutcome, RunStatus};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::repository::RunRepository;

/// Result of a finished build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub status: RunStatus,
    pub logs: String,
}

impl From<RunOutcome> for BuildReport {
    fn from(outcome: RunOutcome) -> Self {
        Self {
            status: outcome.final_status(),
            logs: outcome.logs().to_string(),
        }
    }
}

/// Service trait for executing builds
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    /// Runs the build for a run and reports how it ended
    ///
    /// # Arguments
    /// * `run_id` - The run being built
    /// * `outcome` - The outcome requested at trigger time
    async fn execute(&self, run_id: &str, outcome: RunOutcome) -> BuildReport;
}

/// Build that does no work and finishes after a fixed delay
pub struct SimulatedBuild {
    duration: Duration,
}

impl SimulatedBuild {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl BuildExecutor for SimulatedBuild {
    async fn execute(&self, run_id: &str, outcome: RunOutcome) -> BuildReport {
        debug!("Simulating build for {} ({:?})", run_id, self.duration);
        tokio::time::sleep(self.duration).await;
        BuildReport::from(outcome)
    }
}

/// Spawns one background task per triggered run
///
/// Concurrency is bounded by a semaphore with `max_concurrent_builds` permits.
#[derive(Clone)]
pub struct BuildScheduler {
    runs: RunRepository,
    executor: Arc<dyn BuildExecutor>,
    slots: Arc<Semaphore>,
}

impl BuildScheduler {
    pub fn new(
        runs: RunRepository,
        executor: Arc<dyn BuildExecutor>,
        max_concurrent_builds: usize,
    ) -> Self {
        Self {
            runs,
            executor,
            slots: Arc::new(Semaphore::new(max_concurrent_builds)),
        }
    }

    /// Number of build slots currently free
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Start the build of a queued run in the background
    pub fn schedule(&self, run_id: String, outcome: RunOutcome) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move { scheduler.run_build(run_id, outcome).await })
    }

    async fn run_build(&self, run_id: String, outcome: RunOutcome) {
        let _slot = match self.slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Build slots closed, leaving run {} queued", run_id);
                return;
            }
        };

        if let Err(e) = self.runs.mark_started(&run_id).await {
            warn!("Could not start run {}: {}", run_id, e);
            return;
        }
        info!("Run {} started", run_id);

        let report = self.executor.execute(&run_id, outcome).await;

        match self
            .runs
            .mark_finished(&run_id, report.status, report.logs)
            .await
        {
            Ok(run) => info!("Run {} finished with status: {}", run.id, run.status),
            Err(e) => warn!("Could not finish run {}: {}", run_id, e),
        }
    }
}
