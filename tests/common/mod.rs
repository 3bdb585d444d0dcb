#![allow(dead_code)]

pub mod mock_speech;
pub mod mock_translation;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the `aem-prep` binary against an isolated config and data directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config dir");
        fs::create_dir_all(temp_dir.path().join("data")).expect("Failed to create data dir");
        Self { temp_dir }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_aem-prep");
        Command::new(bin_path)
            .args(args)
            .env("AEM_PREP_CONFIG", self.temp_dir.path().join("config/config.json"))
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env("XDG_DATA_HOME", self.temp_dir.path().join("data"))
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run aem-prep")
    }

    /// Run and return stdout, asserting success
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "aem-prep {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
