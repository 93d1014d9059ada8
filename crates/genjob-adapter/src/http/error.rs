/*
[INPUT]:  Error sources (HTTP transport, API status, serialization, filesystem)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the job API adapter
#[derive(Error, Debug)]
pub enum JobError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status with a body we could not decode
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Download endpoint refused to serve the artifact
    #[error("Download unavailable (code {code}): {error}")]
    DownloadUnavailable {
        code: u16,
        error: String,
        state: Option<String>,
        path: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing the downloaded artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JobError {
    /// Transport-level failures (connection refused, timeout, reset)
    pub fn is_network(&self) -> bool {
        matches!(self, JobError::Http(err) if err.is_connect() || err.is_timeout() || err.is_request())
    }

    /// HTTP status attached to the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            JobError::Api { code, .. } | JobError::DownloadUnavailable { code, .. } => Some(*code),
            JobError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        JobError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for job API operations
pub type Result<T> = std::result::Result<T, JobError>;
