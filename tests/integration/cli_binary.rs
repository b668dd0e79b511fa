//! Tests that run the compiled `casegen` binary.

use super::test_utils::{complete_cases_json, gemini_body, write_inputs, CannedServer};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary inside `workdir` with an isolated config home and no inherited key.
fn casegen(workdir: &Path, envs: &[(&str, &str)], args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_casegen");
    let mut command = Command::new(bin);
    command
        .current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("xdg-config"))
        .env("HOME", workdir)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("CASEGEN_LOG")
        .env_remove("CASEGEN_ENV")
        .args(args);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_missing_api_key_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "{spec}", "spec");

    let output = casegen(temp_dir.path(), &[], &["--quiet"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key not found"),
        "unexpected stderr: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_dotenv_file_supplies_the_key() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "GOOGLE_API_KEY=from-dotenv\n").unwrap();

    // Key resolves from .env, so the run gets as far as the missing inputs.
    let output = casegen(temp_dir.path(), &[], &["--quiet"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Required file not found: prompt_template.txt"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_spec_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("prompt_template.txt"), "{spec}").unwrap();

    let output = casegen(
        temp_dir.path(),
        &[("GOOGLE_API_KEY", "test-key")],
        &["--quiet"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Required file not found: spec.txt"),
        "unexpected stderr: {}",
        stderr
    );
}

#[tokio::test]
async fn test_end_to_end_report_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "Cases for: {spec}", "A search box");
    let server = CannedServer::start(200, "OK", &gemini_body(&complete_cases_json(2))).await;

    let workdir = temp_dir.path().to_path_buf();
    let endpoint = server.base_url.clone();
    let output = tokio::task::spawn_blocking(move || {
        casegen(
            &workdir,
            &[
                ("GOOGLE_API_KEY", "test-key"),
                ("CASEGEN_PROVIDER__ENDPOINT", endpoint.as_str()),
            ],
            &["--log-level", "warn"],
        )
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.starts_with("Successfully generated and parsed test cases!"));
    assert!(stdout.contains("--- Test Case: Case 2 (TC-002) ---"));
    assert!(stdout.contains("Priority: High | Type: Functional"));

    let request = server.received().await;
    assert!(request.contains("Cases for: A search box"));
}

#[test]
fn test_malformed_dotenv_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "this line has no equals sign\n").unwrap();

    let output = casegen(temp_dir.path(), &[], &["--quiet"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Failed to load .env file"),
        "unexpected stderr: {}",
        stderr
    );
    assert!(stderr.contains("API key not found"), "unexpected stderr: {}", stderr);
}

/// Serve `completion` as the model's answer and run the binary against it.
async fn run_against(completion: &str) -> Output {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "Cases for: {spec}", "A search box");
    let server = CannedServer::start(200, "OK", &gemini_body(completion)).await;

    let workdir = temp_dir.path().to_path_buf();
    let endpoint = server.base_url.clone();
    tokio::task::spawn_blocking(move || {
        casegen(
            &workdir,
            &[
                ("GOOGLE_API_KEY", "test-key"),
                ("CASEGEN_PROVIDER__ENDPOINT", endpoint.as_str()),
            ],
            &["--quiet"],
        )
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_unparseable_completion_exits_cleanly() {
    let output = run_against("not json at all").await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Error: Failed to decode JSON."), "stdout: {}", stdout);
    assert!(stdout.contains("Failed to process the model's output."));
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn test_root_object_completion_exits_cleanly() {
    let output = run_against(r#"{"id": "TC-001"}"#).await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Validation Error: Root element is not a JSON array"));
}

#[tokio::test]
async fn test_empty_array_completion_exits_cleanly() {
    let output = run_against("[]").await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("The model returned no test cases."));
}
