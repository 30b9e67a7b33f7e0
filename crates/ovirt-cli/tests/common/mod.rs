use std::process::{Command, Output};

/// Environment variables the CLI reads; cleared so the host setup cannot leak in.
const OVIRT_ENV: &[&str] = &["OVIRT_URL", "OVIRT_USERNAME", "OVIRT_PASSWORD", "OVIRT_INSECURE"];

/// Get live engine settings from environment.
/// Returns None if not set, causing tests to be skipped.
#[allow(dead_code)]
pub fn get_test_engine() -> Option<(String, String, String)> {
    let url = std::env::var("OVIRT_TEST_URL").ok()?;
    let username = std::env::var("OVIRT_TEST_USERNAME").ok()?;
    let password = std::env::var("OVIRT_TEST_PASSWORD").ok()?;
    Some((url, username, password))
}

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ovirt"));
    for var in OVIRT_ENV {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    command().args(args).output().expect("Failed to execute CLI")
}

/// Run the CLI binary with extra environment variables.
#[allow(dead_code)]
pub fn run_cli_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = command();
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so a mock engine on the same runtime keeps serving.
#[allow(dead_code)]
pub async fn run_cli_async(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args)
    })
    .await
    .expect("CLI task panicked")
}

/// Assert success and return stdout.
pub fn expect_success(output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Assert failure and return stderr.
#[allow(dead_code)]
pub fn expect_failure(output: &Output) -> String {
    if output.status.success() {
        panic!("CLI command should have failed");
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
