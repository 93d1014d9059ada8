/*
[INPUT]:  Job API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::enums::TaskState;

/// Body of `POST /start_generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartGenerateResponse {
    #[serde(default)]
    pub task_id: Option<String>,
}

impl StartGenerateResponse {
    /// Task id if the server returned a usable one; empty strings count as missing.
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Body of `GET /task_status/{task_id}`.
///
/// Fields of an unexpected JSON type never fail the decode: a non-string
/// `state` becomes [`TaskState::Other`], an unparseable `progress` becomes `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    #[serde(default, deserialize_with = "lenient_state")]
    pub state: Option<TaskState>,
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Option<String>,
}

fn lenient_state<'de, D>(deserializer: D) -> Result<Option<TaskState>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(raw) => Some(TaskState::from(raw)),
        other => Some(TaskState::Other(other.to_string())),
    })
}

fn lenient_progress<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok().filter(|value: &f64| value.is_finite()),
        _ => None,
    })
}

fn lenient_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(message) => Some(message),
        other => Some(other.to_string()),
    })
}

/// JSON body returned with a 404 from `GET /download/{task_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadErrorResponse {
    pub error: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_response_without_task_id() {
        let response: StartGenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.task_id(), None);

        let response: StartGenerateResponse =
            serde_json::from_str(r#"{"task_id": null}"#).unwrap();
        assert_eq!(response.task_id(), None);

        let response: StartGenerateResponse =
            serde_json::from_str(r#"{"task_id": ""}"#).unwrap();
        assert_eq!(response.task_id(), None);
    }

    #[test]
    fn test_start_response_with_task_id() {
        let response: StartGenerateResponse =
            serde_json::from_str(r#"{"task_id": "3f1c-42"}"#).unwrap();
        assert_eq!(response.task_id(), Some("3f1c-42"));
    }

    #[test]
    fn test_status_response_optional_fields() {
        let status: TaskStatusResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(status.state, None);
        assert_eq!(status.progress, None);
        assert_eq!(status.message, None);

        let status: TaskStatusResponse = serde_json::from_str(
            r#"{"state": "PROGRESS", "progress": 42, "message": "Traitement du fournisseur ACME"}"#,
        )
        .unwrap();
        assert_eq!(status.state, Some(TaskState::Progress));
        assert_eq!(status.progress, Some(42.0));
        assert_eq!(
            status.message.as_deref(),
            Some("Traitement du fournisseur ACME")
        );
    }

    #[test]
    fn test_status_response_tolerates_odd_field_types() {
        let status: TaskStatusResponse =
            serde_json::from_str(r#"{"state": 7, "progress": "n/a", "message": 12}"#).unwrap();
        assert_eq!(status.state, Some(TaskState::Other("7".to_string())));
        assert!(!status.state.as_ref().unwrap().is_running());
        assert_eq!(status.progress, None);
        assert_eq!(status.message.as_deref(), Some("12"));

        let status: TaskStatusResponse = serde_json::from_str(
            r#"{"state": null, "progress": " 37.5 ", "message": null}"#,
        )
        .unwrap();
        assert_eq!(status.state, None);
        assert_eq!(status.progress, Some(37.5));
        assert_eq!(status.message, None);

        let status: TaskStatusResponse =
            serde_json::from_str(r#"{"state": "PROGRESS", "progress": {"done": 3}}"#).unwrap();
        assert_eq!(status.state, Some(TaskState::Progress));
        assert_eq!(status.progress, None);
    }

    #[test]
    fn test_download_error_response() {
        let body: DownloadErrorResponse =
            serde_json::from_str(r#"{"error": "File not ready", "state": "PENDING"}"#).unwrap();
        assert_eq!(body.error, "File not ready");
        assert_eq!(body.state.as_deref(), Some("PENDING"));
        assert_eq!(body.path, None);
    }
}
