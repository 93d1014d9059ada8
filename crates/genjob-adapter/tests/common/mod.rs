/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for genjob-adapter tests

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Task id shaped like the ids the job queue hands out
pub fn sample_task_id() -> String {
    "5b0e7a4c-4f2d-4c1e-9a39-2d6f0c9b1e77".to_string()
}

/// Mount a status response for `task_id` that answers `times` requests
pub async fn mount_status(server: &MockServer, task_id: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/task_status/{task_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(times)
        .mount(server)
        .await;
}
