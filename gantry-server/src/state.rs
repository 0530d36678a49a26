//! Shared application state

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::repository::RunRepository;
use crate::service::{BuildExecutor, BuildScheduler, SimulatedBuild};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub runs: RunRepository,
    pub builds: BuildScheduler,
    pub started_at: Instant,
}

impl AppState {
    /// Creates state whose builds are simulated with the configured delay
    pub fn new(config: &Config) -> Self {
        Self::with_executor(
            config,
            Arc::new(SimulatedBuild::new(config.build_duration)),
        )
    }

    /// Creates state with a custom build executor
    pub fn with_executor(config: &Config, executor: Arc<dyn BuildExecutor>) -> Self {
        let runs = RunRepository::new();
        let builds = BuildScheduler::new(runs.clone(), executor, config.max_concurrent_builds);

        Self {
            runs,
            builds,
            started_at: Instant::now(),
        }
    }
}
