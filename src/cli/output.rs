//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::fs::FixtureFile;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single fixture in listing output.
#[derive(Debug, Serialize)]
pub struct FixtureListing {
    pub path: String,
    pub stem: String,
    pub target: String,
}

impl From<&FixtureFile> for FixtureListing {
    fn from(file: &FixtureFile) -> Self {
        Self {
            path: file.path.to_string_lossy().into_owned(),
            stem: file.stem.clone(),
            target: file.target.to_string(),
        }
    }
}
