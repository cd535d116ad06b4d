#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;
use wiremock::MockServer;

/// Base path the mock backend serves the API under.
pub const BASE_PATH: &str = "/api/v1";

/// Absolute mock path for an endpoint path.
pub fn api_path(endpoint: &str) -> String {
    format!("{}{}", BASE_PATH, endpoint)
}

/// An isolated home directory and credential file for one CLI run.
pub struct TestEnv {
    dir: TempDir,
    api_url: String,
}

impl TestEnv {
    pub fn new(server: &MockServer) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            api_url: format!("{}{}", server.uri(), BASE_PATH),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("credentials.json")
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    /// Write a credential file holding the given entries.
    pub fn seed(&self, entries: serde_json::Value) {
        std::fs::write(self.store_path(), entries.to_string()).unwrap();
    }

    /// The credential file as JSON, or `null` when it does not exist.
    pub fn stored(&self) -> serde_json::Value {
        match std::fs::read_to_string(self.store_path()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap(),
            Err(_) => serde_json::Value::Null,
        }
    }

    /// Run the CLI binary against the mock backend.
    pub async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_folio"))
            .args(args)
            .env("HOME", self.home())
            .env("XDG_DATA_HOME", self.home().join("data"))
            .env("FOLIO_STORE", self.store_path())
            .env("FOLIO_API_URL", &self.api_url)
            .env("NO_COLOR", "1")
            .env_remove("FOLIO_PASSWORD")
            .env_remove("RUST_LOG")
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            panic!(
                "CLI command failed: {:?}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
