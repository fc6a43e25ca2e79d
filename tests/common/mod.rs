//! Shared helpers for integration tests.

pub mod harness;

use golden::Settings;
use std::path::{Path, PathBuf};

/// Returns the checked-in fixture directory.
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Returns the path of a checked-in fixture by file name.
pub fn testdata(name: &str) -> PathBuf {
    testdata_dir().join(name)
}

/// Settings reading fixtures from `dir` with update mode off.
#[allow(dead_code)]
pub fn settings_in(dir: &Path) -> Settings {
    Settings::new().with_dir(dir).with_update(false)
}

/// Reads a file as bytes.
///
/// # Panics
///
/// Panics if the file cannot be read.
#[allow(dead_code)]
pub fn read_bytes(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
