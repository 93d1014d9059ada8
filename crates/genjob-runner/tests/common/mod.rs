/*
[INPUT]:  Mock job server and in-memory display/navigator doubles
[OUTPUT]: Shared fixtures for runner integration tests
[POS]:    Test infrastructure - shared across runner test modules
[UPDATE]: When the display or navigator traits change
*/

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use genjob_runner::{Navigator, StatusDisplay, StatusUpdate};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TASK_ID: &str = "9d3c1f2e-77aa-4b8e-b1c4-0f6a2e5d8c10";

/// Records every update in order
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl RecordingDisplay {
    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<StatusUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show(&self, update: &StatusUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}

/// One navigation, with the number of status polls the server had seen at that moment
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub task_id: String,
    pub url: Url,
    pub polls_seen: usize,
}

/// Records navigations instead of fetching anything
pub struct RecordingNavigator {
    server: Arc<MockServer>,
    visits: Mutex<Vec<Visit>>,
}

impl RecordingNavigator {
    pub fn new(server: Arc<MockServer>) -> Self {
        Self {
            server,
            visits: Mutex::new(Vec::new()),
        }
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, task_id: &str, url: &Url) -> Result<()> {
        let polls_seen = status_requests(&self.server).await;
        self.visits.lock().unwrap().push(Visit {
            task_id: task_id.to_string(),
            url: url.clone(),
            polls_seen,
        });
        Ok(())
    }
}

/// Number of `GET /task_status/...` requests the server has received
pub async fn status_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().starts_with("/task_status/"))
        .count()
}

pub async fn mount_start(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/start_generate"))
        .respond_with(ResponseTemplate::new(202).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Status response served exactly once, in mount order
pub async fn mount_status_once(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/task_status/{TASK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}
