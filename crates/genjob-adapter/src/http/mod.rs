/*
[INPUT]:  HTTP client configuration and job API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod jobs;

pub use error::{JobError, Result};

pub use client::{ClientConfig, JobClient};
pub use jobs::DownloadedArtifact;
