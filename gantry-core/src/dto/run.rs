//! Pipeline run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::{PipelineRun, RunOutcome, RunStatus};

/// Message returned when a run has been accepted
pub const TRIGGERED_MESSAGE: &str = "Pipeline triggered";

/// Optional body of `POST /trigger`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerRun {
    /// Make the simulated build fail
    #[serde(default)]
    pub fail: bool,
}

impl TriggerRun {
    pub fn outcome(&self) -> RunOutcome {
        if self.fail {
            RunOutcome::Failure
        } else {
            RunOutcome::Success
        }
    }
}

/// Response to `POST /trigger`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub message: String,
    pub id: String,
}

impl TriggerResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: TRIGGERED_MESSAGE.to_string(),
            id: id.into(),
        }
    }
}

/// Response to `GET /logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: String,
}

/// Lightweight run entry for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: String,
    pub status: RunStatus,
    pub triggered_at: chrono::DateTime<chrono::Utc>,
}

impl From<&PipelineRun> for RunSummary {
    fn from(run: &PipelineRun) -> Self {
        Self {
            id: run.id.clone(),
            status: run.status,
            triggered_at: run.triggered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_body_defaults_to_success() {
        let req: TriggerRun = serde_json::from_str("{}").unwrap();
        assert_eq!(req.outcome(), RunOutcome::Success);

        let req: TriggerRun = serde_json::from_str(r#"{"fail": true}"#).unwrap();
        assert_eq!(req.outcome(), RunOutcome::Failure);
    }

    #[test]
    fn test_trigger_response_shape() {
        let value = serde_json::to_value(TriggerResponse::new("pipeline-42")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "message": "Pipeline triggered", "id": "pipeline-42" })
        );
    }
}
