//! Task lifecycle types.

use serde::{Deserialize, Serialize};

use crate::ids::{Order, PipelineId, StepId};

/// A task's lifecycle status. Transitions are monotonic:
/// `Queued -> Processing -> {Done, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Queued,
    Processing,
    Done,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Failed)
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(TaskStatus::Queued),
            "processing" => Ok(TaskStatus::Processing),
            "done" => Ok(TaskStatus::Done),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(crate::Error::InvalidInput(format!(
                "unrecognized status {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Queued => "queued",
            TaskStatus::Processing => "processing",
            TaskStatus::Done => "done",
            TaskStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One scheduled step. `order` never changes after creation; `result` is
/// written at the same time as a terminal `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub step_id: StepId,
    pub pipeline_id: PipelineId,
    pub order: Order,
    pub status: TaskStatus,
    pub payload: String,
    pub result: Option<String>,
}

impl Task {
    /// Construct a freshly-queued task, as written by the Launcher or a
    /// successor enqueue from the Step Executor.
    pub fn new_queued(
        step_id: StepId,
        pipeline_id: PipelineId,
        order: Order,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            step_id,
            pipeline_id,
            order,
            status: TaskStatus::Queued,
            payload: payload.into(),
            result: None,
        }
    }
}

/// The four fields the Step Executor requires to be present on every
/// record before it will invoke a processor (§4.1).
pub const REQUIRED_FIELDS: [&str; 4] = ["status", "payload", "pipelineId", "order"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display_and_parse() {
        for status in [
            TaskStatus::Queued,
            TaskStatus::Processing,
            TaskStatus::Done,
            TaskStatus::Failed,
        ] {
            let s = status.to_string();
            assert_eq!(s.parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unrecognized_status_is_invalid_input_error() {
        let err = "bogus".parse::<TaskStatus>().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
    }

    #[test]
    fn new_queued_task_has_no_result() {
        let task = Task::new_queued(
            StepId::new(),
            PipelineId::new("p1"),
            1,
            "hello",
        );
        assert_eq!(task.status, TaskStatus::Queued);
        assert!(task.result.is_none());
    }
}
