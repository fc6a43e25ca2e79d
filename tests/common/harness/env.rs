//! Isolated fixture directory in a temp dir.

#![allow(dead_code)]

use super::GoldenCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary fixture directory, removed on drop.
pub struct TestEnv {
    _temp_dir: TempDir,
    dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("testdata");
        Self {
            _temp_dir: temp_dir,
            dir,
        }
    }

    /// The fixture directory. It does not exist until something is written.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a fixture file, creating parent directories.
    pub fn add_fixture(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn fixture_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Creates a GoldenCommand pointed at this fixture directory.
    pub fn cmd(&self) -> GoldenCommand {
        GoldenCommand::new().dir(&self.dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
