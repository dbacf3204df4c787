//! Common test utilities for tmplmerge integration tests
//!
//! Each test gets its own [`TestProject`] rooted in a temporary directory and
//! drives the compiled binary from there.

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test project rooted in a temporary directory
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create a new empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Absolute path of a file inside the project
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file as text
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e))
    }

    /// Read a file as JSON
    pub fn read_json(&self, relative: &str) -> Value {
        let content = self.read(relative);
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {relative}: {e}\n{content}"))
    }

    /// A `tmplmerge` command running in the project directory with a clean
    /// environment
    pub fn tmplmerge(&self) -> Command {
        let mut cmd = Command::cargo_bin("tmplmerge").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("TMPLMERGE_CONFIG");
        cmd
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(
            !path.exists(),
            "Expected file to not exist: {}",
            path.display()
        );
    }

    /// Assert a file has exact content
    pub fn equals(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert_eq!(content, expected, "File {} content mismatch", path.display());
    }
}
