//! Common test utilities and helpers for repometa tests

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::process::{Command, Output};

/// Variables the binary reads; cleared so the host environment cannot leak in
const ENV_VARS: &[&str] = &[
    "GITHUB_ACCESS_TOKEN",
    "GITHUB_API_URL",
    "TRAVIS",
    "TRAVIS_REPO_SLUG",
    "TRAVIS_PULL_REQUEST",
    "RUST_LOG",
];

/// A scratch working directory for running the binary
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Write `.repo-metadata.yaml` into the working directory
    pub fn with_metadata(self, content: &str) -> Self {
        self.temp_dir
            .child(".repo-metadata.yaml")
            .write_str(content)
            .expect("Failed to write metadata file");
        self
    }

    /// Command for the repometa binary, run inside the working directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_repometa"));
        cmd.current_dir(self.temp_dir.path());
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn run(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let mut cmd = self.command();
        cmd.args(args);
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd.output().expect("Failed to execute repometa")
    }
}

/// Sample metadata used across tests
pub const SAMPLE_METADATA: &str = r#"
description: "new"
homepage: "http://old"
topics:
  - a
  - b
"#;

/// Assertion helpers for test validation
pub fn assert_contains_all(text: &str, expected: &[&str]) {
    for item in expected {
        assert!(
            text.contains(item),
            "Expected text to contain '{}', but it didn't. Text: {}",
            item,
            text
        );
    }
}
