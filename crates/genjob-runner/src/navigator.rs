/*
[INPUT]:  Task id and download URL of a finished task
[OUTPUT]: Artifact on disk (download) or the URL on stdout (print)
[POS]:    Completion layer - what happens once a task reports SUCCESS
[UPDATE]: When adding new completion targets
*/

use anyhow::{Context, Result};
use async_trait::async_trait;
use genjob_adapter::JobClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Target invoked exactly once when a task succeeds.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, task_id: &str, url: &Url) -> Result<()>;
}

/// Fetches the artifact into `output_dir`.
#[derive(Debug, Clone)]
pub struct DownloadNavigator {
    client: Arc<JobClient>,
    output_dir: PathBuf,
}

impl DownloadNavigator {
    pub fn new(client: Arc<JobClient>, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }
}

#[async_trait]
impl Navigator for DownloadNavigator {
    async fn navigate(&self, task_id: &str, url: &Url) -> Result<()> {
        info!(task_id, %url, output_dir = %self.output_dir.display(), "downloading artifact");
        let artifact = self
            .client
            .download(task_id, &self.output_dir)
            .await
            .with_context(|| format!("download {url}"))?;
        println!("Saved {} ({} bytes)", artifact.path.display(), artifact.bytes);
        Ok(())
    }
}

/// Prints the download URL without fetching it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintNavigator;

#[async_trait]
impl Navigator for PrintNavigator {
    async fn navigate(&self, task_id: &str, url: &Url) -> Result<()> {
        info!(task_id, %url, "artifact ready");
        println!("{url}");
        Ok(())
    }
}
