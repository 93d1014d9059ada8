/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public job API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::client::DEFAULT_BASE_URL;
pub use http::jobs::DEFAULT_ARTIFACT_NAME;
pub use http::{ClientConfig, DownloadedArtifact, JobClient, JobError, Result};

// Re-export all types
pub use types::*;
