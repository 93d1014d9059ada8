/*
[INPUT]:  Task identifiers and an output directory for artifacts
[OUTPUT]: Task start handles, task status snapshots, downloaded artifacts
[POS]:    HTTP layer - job endpoints (start, status, download)
[UPDATE]: When adding new job endpoints or changing response format
*/

use crate::http::{JobClient, JobError, Result};
use crate::types::{DownloadErrorResponse, StartGenerateResponse, TaskStatusResponse};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, Url};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// File name used when the server does not name the attachment
pub const DEFAULT_ARTIFACT_NAME: &str = "generated_templates.zip";

/// Artifact written to disk by [`JobClient::download`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

impl JobClient {
    /// Start a template generation task
    ///
    /// POST /start_generate
    pub async fn start_generate(&self) -> Result<StartGenerateResponse> {
        let builder = self
            .request(Method::POST, &["start_generate"])?
            .header(CONTENT_TYPE, "application/json");
        self.send_json(builder).await
    }

    /// Query the state of a task
    ///
    /// GET /task_status/{task_id}
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatusResponse> {
        let builder = self.request(Method::GET, &["task_status", task_id])?;
        self.send_json(builder).await
    }

    /// URL of the artifact produced by a finished task
    ///
    /// GET /download/{task_id}
    pub fn download_url(&self, task_id: &str) -> Result<Url> {
        self.endpoint_url(&["download", task_id])
    }

    /// Fetch the artifact of a finished task into `output_dir`
    pub async fn download(&self, task_id: &str, output_dir: &Path) -> Result<DownloadedArtifact> {
        let url = self.download_url(task_id)?;
        let builder = self.request(Method::GET, &["download", task_id])?;
        let mut response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(match serde_json::from_slice::<DownloadErrorResponse>(&body) {
                Ok(refusal) => JobError::DownloadUnavailable {
                    code: status.as_u16(),
                    error: refusal.error,
                    state: refusal.state,
                    path: refusal.path,
                },
                Err(_) => JobError::api_error(
                    status,
                    String::from_utf8_lossy(&body).trim().to_string(),
                ),
            });
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

        tokio::fs::create_dir_all(output_dir).await?;
        let path = output_dir.join(file_name);
        debug!(%url, path = %path.display(), "writing artifact");

        // The body lands in a sibling temp file; `path` is only replaced once it is complete.
        let (file, temp_path) = tempfile::NamedTempFile::new_in(output_dir)?.into_parts();
        let mut file = tokio::fs::File::from_std(file);
        let mut bytes = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);
        temp_path.persist(&path).map_err(std::io::Error::from)?;

        info!(task_id, path = %path.display(), bytes, "artifact downloaded");
        Ok(DownloadedArtifact { path, bytes })
    }
}

/// Extract a safe file name from a `Content-Disposition` header value.
///
/// Only the final path component is kept.
fn attachment_file_name(header: &str) -> Option<String> {
    let raw = header.split(';').map(str::trim).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("filename")
            .then(|| value.trim().trim_matches('"'))
    })?;

    let name = Path::new(raw).file_name()?.to_str()?;
    if name.is_empty() || name == ".." {
        return None;
    }
    Some(name.to_string())
}
