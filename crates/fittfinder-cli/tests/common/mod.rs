use std::process::{Command, Output};

/// A token whose claims expire on 2100-01-01.
pub const TEST_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJhdWQiOiJmaXR0ZmluZGVyIiwic3ViIjoidTEiLCJleHAiOjQxMDI0NDQ4MDAsInJvbGVzIjpbIlNVUEVSIl19.sig";

const CONFIG_VARS: [&str; 4] = [
    "FITTFINDER_API_URL",
    "FITTFINDER_API_USERNAME",
    "FITTFINDER_API_PASSWORD",
    "FITTFINDER_API_USER_AGENT",
];

/// Whether the live API variables are set; tests skip themselves otherwise.
#[allow(dead_code)]
pub fn live_api_configured() -> bool {
    CONFIG_VARS[..3]
        .iter()
        .all(|name| std::env::var(name).is_ok_and(|v| !v.is_empty()))
}

/// Run the CLI binary with the inherited environment.
#[allow(dead_code)]
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fittfinder"));
    cmd.args(args);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with the API configuration replaced by `env`.
pub fn run_cli_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fittfinder"));
    cmd.args(args);
    for name in CONFIG_VARS {
        cmd.env_remove(name);
    }
    cmd.env_remove("RUST_LOG");
    for (name, value) in env {
        cmd.env(name, value);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Environment pointing the CLI at a mock server.
#[allow(dead_code)]
pub fn mock_env(uri: &str) -> Vec<(&'static str, String)> {
    vec![
        ("FITTFINDER_API_URL", uri.to_string()),
        ("FITTFINDER_API_USERNAME", "alice".to_string()),
        ("FITTFINDER_API_PASSWORD", "secret".to_string()),
    ]
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
