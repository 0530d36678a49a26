//! Pipeline run domain types

use serde::{Deserialize, Serialize};

/// Log text recorded for a build that finished successfully
pub const SUCCESS_LOGS: &str = "Build completed successfully.";

/// Log text recorded for a build that failed
pub const FAILURE_LOGS: &str = "Build failed.";

/// Prefix of every run identifier
pub const RUN_ID_PREFIX: &str = "pipeline-";

/// A single triggered pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    pub triggered_at: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PipelineRun {
    /// Creates a freshly queued run
    pub fn queued(id: String, triggered_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id,
            status: RunStatus::Queued,
            logs: None,
            triggered_at,
            started_at: None,
            completed_at: None,
        }
    }

    /// Wall-clock build time, once the run has both started and finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.signed_duration_since(started)),
            _ => None,
        }
    }
}

/// Pipeline run status
///
/// Valid transitions:
/// - `Queued` -> `InProgress`
/// - `InProgress` -> `Success`
/// - `InProgress` -> `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    Queued,
    #[serde(rename = "In Progress")]
    InProgress,
    Success,
    Failed,
}

impl RunStatus {
    /// Whether the run has finished and will not change again
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Success | RunStatus::Failed)
    }

    pub fn can_transition_to(self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (RunStatus::Queued, RunStatus::InProgress)
                | (RunStatus::InProgress, RunStatus::Success)
                | (RunStatus::InProgress, RunStatus::Failed)
        )
    }

    /// Wire representation of the status
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Queued => "Queued",
            RunStatus::InProgress => "In Progress",
            RunStatus::Success => "Success",
            RunStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome a simulated build is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOutcome {
    #[default]
    Success,
    Failure,
}

impl RunOutcome {
    /// Final status a run reaches with this outcome
    pub fn final_status(self) -> RunStatus {
        match self {
            RunOutcome::Success => RunStatus::Success,
            RunOutcome::Failure => RunStatus::Failed,
        }
    }

    /// Log text recorded for this outcome
    pub fn logs(self) -> &'static str {
        match self {
            RunOutcome::Success => SUCCESS_LOGS,
            RunOutcome::Failure => FAILURE_LOGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&RunStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<RunStatus>("\"Success\"").unwrap(),
            RunStatus::Success
        );
        assert_eq!(RunStatus::Queued.to_string(), "Queued");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(RunStatus::Queued.can_transition_to(RunStatus::InProgress));
        assert!(RunStatus::InProgress.can_transition_to(RunStatus::Success));
        assert!(RunStatus::InProgress.can_transition_to(RunStatus::Failed));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!RunStatus::Queued.can_transition_to(RunStatus::Success));
        assert!(!RunStatus::Success.can_transition_to(RunStatus::InProgress));
        assert!(!RunStatus::Failed.can_transition_to(RunStatus::Success));
        assert!(!RunStatus::InProgress.can_transition_to(RunStatus::InProgress));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(RunStatus::Success.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
    }

    #[test]
    fn test_queued_run_omits_empty_fields() {
        let run = PipelineRun::queued("pipeline-1".to_string(), chrono::Utc::now());
        let value = serde_json::to_value(&run).unwrap();

        assert_eq!(value["id"], "pipeline-1");
        assert_eq!(value["status"], "Queued");
        assert!(value.get("logs").is_none());
        assert!(value.get("started_at").is_none());
        assert!(run.duration().is_none());
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(RunOutcome::default(), RunOutcome::Success);
        assert_eq!(RunOutcome::Success.final_status(), RunStatus::Success);
        assert_eq!(RunOutcome::Failure.final_status(), RunStatus::Failed);
        assert_eq!(RunOutcome::Success.logs(), "Build completed successfully.");
    }
}
