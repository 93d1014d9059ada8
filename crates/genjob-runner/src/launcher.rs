/*
[INPUT]:  User trigger, JobClient, StatusDisplay, StatusPoller
[OUTPUT]: Started task handed to the poller, or a start failure shown to the user
[POS]:    Execution layer - entry point of a generation run
[UPDATE]: When changing the start request or how the task id is extracted
*/

use crate::display::{StatusDisplay, StatusUpdate};
use crate::error::GenerationFailure;
use crate::navigator::Navigator;
use crate::poller::{CompletedGeneration, StatusPoller};
use genjob_adapter::JobClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Starts a generation task and drives it to completion through [`StatusPoller`].
#[derive(Clone)]
pub struct TaskLauncher {
    client: Arc<JobClient>,
    display: Arc<dyn StatusDisplay>,
    poller: StatusPoller,
}

impl TaskLauncher {
    pub fn new(
        client: Arc<JobClient>,
        display: Arc<dyn StatusDisplay>,
        navigator: Arc<dyn Navigator>,
        poll_interval: Duration,
    ) -> Self {
        let poller = StatusPoller::new(client.clone(), display.clone(), navigator, poll_interval);
        Self {
            client,
            display,
            poller,
        }
    }

    /// Start the task, then poll it until a terminal state.
    ///
    /// The poller is never invoked when the start response lacks a task id.
    pub async fn run(&self) -> Result<CompletedGeneration, GenerationFailure> {
        self.display.show(&StatusUpdate::Starting);

        let response = match self.client.start_generate().await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    status = ?err.status_code(),
                    network = err.is_network(),
                    error = %err,
                    "error starting generation"
                );
                self.display.show(&StatusUpdate::StartFailed);
                return Err(GenerationFailure::Start(err));
            }
        };
        info!(?response, "start_generate response");

        let Some(task_id) = response.task_id() else {
            error!("task id is missing from start response");
            self.display.show(&StatusUpdate::StartFailed);
            return Err(GenerationFailure::MissingTaskId);
        };

        info!(task_id, "generation task started");
        self.poller.poll(task_id).await
    }
}
