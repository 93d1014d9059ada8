/*
[INPUT]:  Raw `state` strings reported by the task status endpoint
[OUTPUT]: TaskState enum with running/success classification
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the server reports new task states
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a background task as reported by `GET /task_status/{id}`.
///
/// Unknown strings are kept verbatim in [`TaskState::Other`] so they can be
/// logged; they are classified as terminal failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    Pending,
    Started,
    Progress,
    Success,
    Failure,
    Retry,
    Revoked,
    Other(String),
}

impl TaskState {
    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::Started => "STARTED",
            TaskState::Progress => "PROGRESS",
            TaskState::Success => "SUCCESS",
            TaskState::Failure => "FAILURE",
            TaskState::Retry => "RETRY",
            TaskState::Revoked => "REVOKED",
            TaskState::Other(raw) => raw,
        }
    }

    /// States after which the client keeps polling.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            TaskState::Pending | TaskState::Started | TaskState::Progress
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskState::Success)
    }
}

impl From<String> for TaskState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => TaskState::Pending,
            "STARTED" => TaskState::Started,
            "PROGRESS" => TaskState::Progress,
            "SUCCESS" => TaskState::Success,
            "FAILURE" => TaskState::Failure,
            "RETRY" => TaskState::Retry,
            "REVOKED" => TaskState::Revoked,
            _ => TaskState::Other(raw),
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
