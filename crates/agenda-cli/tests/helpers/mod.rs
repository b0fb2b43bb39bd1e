use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary data file
pub struct CliTestHarness {
    _temp_dir: TempDir,
    data_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary data file
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_path = temp_dir.path().join("agenda.json");

        Self {
            _temp_dir: temp_dir,
            data_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("agenda").expect("Failed to find agenda binary");

        // Point the data file at the temp directory via environment variable
        cmd.env("AGENDA_DATA_FILE", &self.data_path);

        cmd
    }

    /// Get the data file path for this test instance
    pub fn data_path(&self) -> &std::path::Path {
        &self.data_path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Export the snapshot and return the full event ids in store order
    pub fn event_ids(&self) -> Vec<String> {
        let output = self
            .command()
            .arg("export")
            .output()
            .expect("Failed to run export");
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Export was not valid JSON");
        json["events"]
            .as_array()
            .map(|events| {
                events
                    .iter()
                    .map(|e| e["id"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Export the snapshot and parse it into a JSON value
    pub fn snapshot(&self) -> serde_json::Value {
        let output = self
            .command()
            .arg("export")
            .output()
            .expect("Failed to run export");
        serde_json::from_slice(&output.stdout).expect("Export was not valid JSON")
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output indicates successful event creation
    pub fn event_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created event")
            .or(predicate::str::contains("Created recurring event"))
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
