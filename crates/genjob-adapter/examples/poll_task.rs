/*
[INPUT]:  Job server base URL (defaults to http://localhost:5000)
[OUTPUT]: Task start, status snapshots and the artifact download URL
[POS]:    Examples - raw job API usage without the runner
[UPDATE]: When adding new job endpoints
*/

use genjob_adapter::*;
use std::time::Duration;

/// Example: start a generation task and poll it by hand
#[tokio::main]
async fn main() {
    println!("=== Job API Example ===\n");

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let client = match JobClient::new(&base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.base_url());

    let task_id = match client.start_generate().await {
        Ok(response) => match response.task_id() {
            Some(id) => id.to_string(),
            None => {
                println!("✗ Server did not return a task id");
                return;
            }
        },
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };
    println!("✓ Task started: {}", task_id);

    loop {
        match client.task_status(&task_id).await {
            Ok(status) => {
                println!("  status: {:?}", status);
                match status.state {
                    Some(state) if state.is_running() => {}
                    Some(state) if state.is_success() => break,
                    _ => {
                        println!("✗ Task did not succeed");
                        return;
                    }
                }
            }
            Err(e) => {
                println!("✗ Error: {}", e);
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    match client.download_url(&task_id) {
        Ok(url) => println!("\n✓ Artifact ready at {}", url),
        Err(e) => println!("✗ Error: {}", e),
    }
}
