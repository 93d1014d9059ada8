/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for job API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{JobError, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default base URL of the job server
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the template generation job API
#[derive(Debug, Clone)]
pub struct JobClient {
    http_client: Client,
    base_url: Url,
}

impl JobClient {
    /// Create a client for `base_url` with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a client for `base_url` with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(JobError::Config(format!(
                "base URL must be an http(s) URL, got {base_url}"
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL under the base URL from raw path segments.
    ///
    /// Each segment is percent-encoded as a whole, so opaque ids containing
    /// `/` or `?` still address a single path segment.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| JobError::Config(format!("base URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a request builder for an endpoint, tagged with a fresh request id
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, %url, %request_id, "building request");
        Ok(self
            .http_client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id))
    }

    /// Send a request and decode its JSON body.
    ///
    /// The body is decoded whatever the status code; a body that fails to
    /// decode on a non-success status becomes [`JobError::Api`].
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Ok(value),
            Err(err) if status.is_success() => Err(JobError::Serialization(err)),
            Err(_) => Err(JobError::api_error(
                status,
                String::from_utf8_lossy(&body).trim().to_string(),
            )),
        }
    }
}
