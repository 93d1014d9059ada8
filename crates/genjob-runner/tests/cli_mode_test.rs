/*
[INPUT]:  Compiled genjob-runner binary and temporary config files
[OUTPUT]: Exit status and error output checks for non-interactive CLI modes
[POS]:    Integration test layer - binary surface
[UPDATE]: When changing CLI flags or config validation
*/

mod common;

use common::{TASK_ID, mount_start, mount_status_once};
use std::process::Command;
use wiremock::MockServer;

fn runner() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_genjob-runner"));
    command.env_remove("GENJOB_BASE_URL").env("RUST_LOG", "error");
    command
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "base_url: http://localhost:5000\npoll_interval_ms: 2000\noutput_dir: ./downloads\n",
    )
    .expect("write config");

    let output = runner()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .output()
        .expect("Failed to start genjob-runner binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_mode_rejects_zero_poll_interval() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "poll_interval_ms: 0\n").expect("write config");

    let output = runner()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--dry-run")
        .output()
        .expect("Failed to start genjob-runner binary");

    assert!(!output.status.success());
}

#[test]
fn cli_mode_missing_config_fails() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = runner()
        .arg("generate")
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .arg("--dry-run")
        .output()
        .expect("Failed to start genjob-runner binary");

    assert!(!output.status.success());
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_mode_reports_failed_task_id() {
    let server = MockServer::start().await;
    mount_start(&server, serde_json::json!({ "task_id": TASK_ID })).await;
    mount_status_once(&server, serde_json::json!({ "state": "FAILURE" })).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!("base_url: {}\npoll_interval_ms: 10\n", server.uri()),
    )
    .expect("write config");

    let mut command = tokio::process::Command::from(runner());
    let output = command
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--no-download")
        .output()
        .await
        .expect("Failed to start genjob-runner binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(
        stderr.contains(&format!("generation of task {TASK_ID} failed")),
        "Stderr: {stderr}"
    );
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("Error while generating templates."),
        "Stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}
