/*
[INPUT]:  Task id, JobClient, StatusDisplay, Navigator, fixed poll interval
[OUTPUT]: CompletedGeneration on SUCCESS, GenerationFailure otherwise
[POS]:    Execution layer - status poll loop of a generation run
[UPDATE]: When changing which states continue polling or how success completes
*/

use crate::display::{StatusDisplay, StatusUpdate};
use crate::error::GenerationFailure;
use crate::navigator::Navigator;
use genjob_adapter::{JobClient, TaskState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Result of a run that reached SUCCESS and navigated to the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedGeneration {
    pub task_id: String,
    pub download_url: Url,
    /// Number of status requests issued, the successful one included
    pub polls: u64,
}

/// Polls `GET /task_status/{id}` at a fixed interval until a terminal state.
///
/// There is no backoff, no retry limit and no cancellation: the loop ends
/// only on SUCCESS, on any other terminal state, or on a request failure.
#[derive(Clone)]
pub struct StatusPoller {
    client: Arc<JobClient>,
    display: Arc<dyn StatusDisplay>,
    navigator: Arc<dyn Navigator>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(
        client: Arc<JobClient>,
        display: Arc<dyn StatusDisplay>,
        navigator: Arc<dyn Navigator>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            display,
            navigator,
            interval,
        }
    }

    pub async fn poll(&self, task_id: &str) -> Result<CompletedGeneration, GenerationFailure> {
        let mut polls = 0u64;
        loop {
            polls += 1;
            let status = match self.client.task_status(task_id).await {
                Ok(status) => status,
                Err(source) => {
                    error!(
                        task_id,
                        poll = polls,
                        status = ?source.status_code(),
                        network = source.is_network(),
                        error = %source,
                        "error polling task status"
                    );
                    self.display.show(&StatusUpdate::StatusFailed);
                    return Err(GenerationFailure::Status {
                        task_id: task_id.to_string(),
                        source,
                    });
                }
            };
            debug!(
                task_id,
                poll = polls,
                state = ?status.state,
                progress = ?status.progress,
                message = ?status.message,
                "polling status"
            );

            match status.state {
                Some(ref state) if state.is_running() => {
                    self.display.show(&StatusUpdate::running(&status));
                    tokio::time::sleep(self.interval).await;
                }
                Some(TaskState::Success) => {
                    self.display.show(&StatusUpdate::Finished);
                    return self.complete(task_id, polls).await;
                }
                state => {
                    error!(
                        task_id,
                        poll = polls,
                        state = ?state,
                        message = ?status.message,
                        "task error"
                    );
                    self.display.show(&StatusUpdate::TaskFailed);
                    return Err(GenerationFailure::TaskFailed {
                        task_id: task_id.to_string(),
                        state,
                        message: status.message,
                    });
                }
            }
        }
    }

    async fn complete(
        &self,
        task_id: &str,
        polls: u64,
    ) -> Result<CompletedGeneration, GenerationFailure> {
        let download_url = match self.client.download_url(task_id) {
            Ok(url) => url,
            Err(err) => return Err(self.navigation_failed(task_id, err.to_string())),
        };

        if let Err(err) = self.navigator.navigate(task_id, &download_url).await {
            return Err(self.navigation_failed(task_id, format!("{err:#}")));
        }

        info!(task_id, polls, %download_url, "generation complete");
        Ok(CompletedGeneration {
            task_id: task_id.to_string(),
            download_url,
            polls,
        })
    }

    fn navigation_failed(&self, task_id: &str, reason: String) -> GenerationFailure {
        error!(task_id, reason = %reason, "navigation to artifact failed");
        self.display.show(&StatusUpdate::DownloadFailed);
        GenerationFailure::Navigation {
            task_id: task_id.to_string(),
            reason,
        }
    }
}
