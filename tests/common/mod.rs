//! Common test utilities for sitepush CLI tests.
//!
//! `TestEnv` gives each test an isolated working directory (where the
//! configuration documents are looked up) and helpers to run the binary
//! inside it.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running the sitepush binary.
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr, for assertion messages.
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated working directory for one test run.
pub struct TestEnv {
    pub workdir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workdir: TempDir::new().expect("temp working directory"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_sitepush")),
        }
    }

    /// Write a file relative to the working directory.
    pub fn write_file(&self, relative: &str, content: &str) {
        let full = self.workdir.path().join(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("create parent directories");
        }
        std::fs::write(&full, content).expect("write file");
    }

    /// Run the binary in the working directory.
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(self.workdir.path())
            .args(args)
            .env("SITEPUSH_NO_COLOR", "1")
            .output()
            .expect("failed to execute sitepush");
        result_of(output)
    }
}

fn result_of(output: Output) -> TestResult {
    TestResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
