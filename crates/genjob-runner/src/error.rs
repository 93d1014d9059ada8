/*
[INPUT]:  Adapter errors and terminal task states
[OUTPUT]: GenerationFailure - why a generation run stopped without an artifact
[POS]:    Error handling layer - runner library
[UPDATE]: When adding new failure paths to the launcher or poller
*/

use genjob_adapter::{JobError, TaskState};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationFailure {
    /// Start endpoint answered without a usable task id
    #[error("start response did not contain a task id")]
    MissingTaskId,

    #[error("failed to start generation: {0}")]
    Start(#[source] JobError),

    /// Task reached a terminal state other than SUCCESS (or reported none)
    #[error("task {task_id} ended in state {}", .state.as_ref().map_or("<missing>", TaskState::as_str))]
    TaskFailed {
        task_id: String,
        state: Option<TaskState>,
        message: Option<String>,
    },

    #[error("failed to retrieve status of task {task_id}: {source}")]
    Status {
        task_id: String,
        #[source]
        source: JobError,
    },

    #[error("failed to fetch artifact of task {task_id}: {reason}")]
    Navigation { task_id: String, reason: String },
}

impl GenerationFailure {
    /// Task id the failure relates to, when one was obtained
    pub fn task_id(&self) -> Option<&str> {
        match self {
            GenerationFailure::MissingTaskId | GenerationFailure::Start(_) => None,
            GenerationFailure::TaskFailed { task_id, .. }
            | GenerationFailure::Status { task_id, .. }
            | GenerationFailure::Navigation { task_id, .. } => Some(task_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_failed_message() {
        let failure = GenerationFailure::TaskFailed {
            task_id: "abc".to_string(),
            state: Some(TaskState::Failure),
            message: None,
        };
        assert_eq!(failure.to_string(), "task abc ended in state FAILURE");
        assert_eq!(failure.task_id(), Some("abc"));

        let failure = GenerationFailure::TaskFailed {
            task_id: "abc".to_string(),
            state: None,
            message: None,
        };
        assert_eq!(failure.to_string(), "task abc ended in state <missing>");
    }

    #[test]
    fn test_missing_task_id_has_no_task() {
        assert_eq!(GenerationFailure::MissingTaskId.task_id(), None);
    }
}
