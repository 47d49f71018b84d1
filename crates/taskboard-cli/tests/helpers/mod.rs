#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary board file
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with an empty temporary directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_path = temp_dir.path().join("tasks.json");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// A command running inside the temp directory with the data file set
    /// through the environment
    pub fn command(&self) -> Command {
        let mut cmd = self.bare_command();
        cmd.env("TASKBOARD_DATA_FILE", &self.data_path);
        cmd
    }

    /// A command running inside the temp directory without any overrides
    pub fn bare_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").expect("Failed to find taskboard binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("TASKBOARD_DATA_FILE")
            .env_remove("TASKBOARD_MAX_BACKUPS")
            .env_remove("TASKBOARD_SHOW_BACKLOG")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_path(&self) -> &Path {
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

    /// The persisted board document
    pub fn board(&self) -> serde_json::Value {
        let contents =
            std::fs::read_to_string(&self.data_path).expect("Failed to read board file");
        serde_json::from_str(&contents).expect("Board file is not valid JSON")
    }

    /// Tasks in the board document
    pub fn tasks(&self) -> Vec<serde_json::Value> {
        self.board()["tasks"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    /// Id of the first task with `title`
    pub fn task_id(&self, title: &str) -> String {
        self.tasks()
            .iter()
            .find(|task| task["title"] == title)
            .and_then(|task| task["id"].as_str())
            .map(String::from)
            .unwrap_or_else(|| panic!("No task titled '{}'", title))
    }

    /// Id of the open (not done) task with `title`
    pub fn open_task_id(&self, title: &str) -> String {
        self.tasks()
            .iter()
            .find(|task| task["title"] == title && task["status"] != "done")
            .and_then(|task| task["id"].as_str())
            .map(String::from)
            .unwrap_or_else(|| panic!("No open task titled '{}'", title))
    }
}

/// Utility predicates for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Output contains the task table headers
    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Status"))
    }

    /// Output indicates successful task creation
    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task").or(predicate::str::contains("Created recurring task"))
    }

    /// Output indicates successful completion
    pub fn task_completed_successfully() -> impl Predicate<str> {
        predicate::str::contains("Completed task")
    }

    /// Output contains an error message
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
