//! Configuration file and update-mode switch.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that turns on update mode.
pub const UPDATE_ENV: &str = "GOLDEN_UPDATE";

/// Name of the optional configuration file in the package root.
pub const CONFIG_FILE: &str = "golden.toml";

/// Command-line switches that turn on update mode.
pub const UPDATE_FLAGS: [&str; 2] = ["--update", "-update"];

/// Settings read from `golden.toml`.
///
/// ```toml
/// dir = "tests/testdata"
/// update = false
/// file_mode = 0o644
/// dir_mode = 0o755
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Fixture directory, relative to the working directory of the tests
    pub dir: Option<PathBuf>,

    /// Default for update mode when neither the flag nor the env var is set
    pub update: Option<bool>,

    /// Permission bits for written fixture files
    pub file_mode: Option<u32>,

    /// Permission bits for created fixture directories
    pub dir_mode: Option<u32>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Cargo sets `CARGO_MANIFEST_DIR` for test binaries, so this is the
    /// package root; otherwise the current directory.
    pub fn config_path() -> PathBuf {
        std::env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    /// Resolve the fixture directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. `testdata`
    pub fn fixtures_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from(crate::settings::DEFAULT_DIR))
    }

    /// Resolve update mode from the process arguments and environment.
    pub fn update_enabled(&self) -> Result<bool> {
        let env = std::env::var(UPDATE_ENV).ok();
        self.update_from(env.as_deref(), std::env::args_os())
    }

    /// Resolve update mode from explicit sources.
    ///
    /// Precedence order:
    /// 1. `--update` or `-update` among `args`
    /// 2. `GOLDEN_UPDATE`, unless empty
    /// 3. Config file `update` setting
    /// 4. `false`
    pub fn update_from<I, S>(&self, env: Option<&str>, args: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if args
            .into_iter()
            .any(|arg| UPDATE_FLAGS.iter().any(|flag| OsStr::new(flag) == arg.as_ref()))
        {
            return Ok(true);
        }

        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return parse_bool(value).with_context(|| format!("cannot parse {UPDATE_ENV}"));
        }

        Ok(self.update.unwrap_or(false))
    }
}

/// Error returned for a string that is not a recognized boolean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean '{0}': expected one of 1, t, true, 0, f, false")]
pub struct ParseBoolError(String);

/// Parses the boolean spellings accepted for `GOLDEN_UPDATE`.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`,
/// `FALSE`, `false`, `False`.
pub fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ParseBoolError(other.to_string())),
    }
}
