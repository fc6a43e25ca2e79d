//! Process-wide defaults every fixture tool is derived from.

use crate::config::Config;
use crate::fs::{FileSystem, OsFileSystem};
use crate::target::Target;
use crate::testing::TestingTb;
use crate::tool::Tool;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fixture directory used when nothing else is configured.
pub const DEFAULT_DIR: &str = "testdata";

/// Permission bits for written fixture files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Permission bits for created fixture directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Everything a [`Tool`] needs except the test it works for.
///
/// Build one during start-up, then derive a tool per test with
/// [`Settings::with_test`]. Settings are never changed by the tools
/// derived from them.
///
/// # Examples
///
/// ```
/// use golden::Settings;
/// use golden::fs::MemoryFileSystem;
/// use golden::testing::Recorder;
/// use std::sync::Arc;
///
/// let settings = Settings::new()
///     .with_dir("fixtures")
///     .with_update(true)
///     .with_fs(Arc::new(MemoryFileSystem::new()));
///
/// let t = Recorder::new("TestRender");
/// let tool = settings.with_test(&t);
/// tool.assert(b"rendered");
/// assert_eq!(tool.read(), Some(b"rendered".to_vec()));
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    dir: PathBuf,
    file_mode: u32,
    dir_mode: u32,
    update: bool,
    fs: Arc<dyn FileSystem>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            file_mode: DEFAULT_FILE_MODE,
            dir_mode: DEFAULT_DIR_MODE,
            update: false,
            fs: Arc::new(OsFileSystem),
        }
    }
}

impl Settings {
    /// Defaults with update mode off and the real file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds settings from the config file, `GOLDEN_UPDATE` and the
    /// process arguments.
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let update = config.update_enabled()?;
        Ok(Self::from_config(&config, update))
    }

    /// Builds settings from an already loaded config.
    pub fn from_config(config: &Config, update: bool) -> Self {
        Self {
            dir: config.fixtures_dir(None),
            file_mode: config.file_mode.unwrap_or(DEFAULT_FILE_MODE),
            dir_mode: config.dir_mode.unwrap_or(DEFAULT_DIR_MODE),
            update,
            fs: Arc::new(OsFileSystem),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Replaces the storage backend.
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_mode(&self) -> u32 {
        self.file_mode
    }

    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }

    pub fn update_enabled(&self) -> bool {
        self.update
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Derives a tool bound to `test`, addressing its golden fixture.
    pub fn with_test<'t>(&self, test: &'t dyn TestingTb) -> Tool<'t> {
        Tool::new(test, self, Target::Golden)
    }
}
