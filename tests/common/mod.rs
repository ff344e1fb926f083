//! Common helpers for jobhist integration tests
//!
//! Each test gets its own temporary history root and a `jobhist` command that
//! ignores the user's settings file and terminal color settings.

// Not every helper is used by every test file
#![allow(dead_code)]

use assert_cmd::Command;
use jobhist_cli::test_utils::HistoryFixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a history root and an optional settings file
pub struct TestHistory {
    temp: TempDir,
    root: PathBuf,
}

impl TestHistory {
    /// Empty history root
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("history");
        fs::create_dir_all(&root).unwrap();
        Self { temp, root }
    }

    /// History root populated from `fixture`
    pub fn with_jobs(fixture: &HistoryFixture) -> Self {
        let history = Self::new();
        fixture.write_to(&history.root).unwrap();
        history
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn job_file(&self, id: &str, name: &str) -> PathBuf {
        self.root.join(id).join(name)
    }

    /// Write `content` to a file next to the history root and return its path
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Path of the settings file used by [`TestHistory::jobhist`]. It does
    /// not exist until a test writes it.
    pub fn settings_path(&self) -> PathBuf {
        self.temp.path().join("jobhist.toml")
    }

    pub fn write_settings(&self, toml: &str) {
        fs::write(self.settings_path(), toml).unwrap();
    }

    /// `jobhist` command isolated from the environment
    pub fn jobhist(&self) -> Command {
        let mut cmd = Command::cargo_bin("jobhist").unwrap();
        cmd.current_dir(self.temp.path())
            .env("JOBHIST_CONFIG", self.settings_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
