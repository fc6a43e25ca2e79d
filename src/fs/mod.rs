//! File-system capability used by the fixture tool.
//!
//! Every byte the tool reads or writes goes through [`FileSystem`], so the
//! storage backend can be swapped: [`OsFileSystem`] talks to the real disk,
//! [`MemoryFileSystem`] keeps everything in a map for tests.

mod memory;
mod os;
mod scan;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;
pub use scan::{FixtureFile, scan_fixtures};

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors during file system operations on fixtures.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("fixture file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            io::ErrorKind::NotADirectory => FsError::NotADirectory { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }

    /// Returns true when the error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

/// What kind of entry a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
}

impl FileKind {
    pub fn is_dir(self) -> bool {
        self == FileKind::Dir
    }
}

/// The operations the fixture tool needs from storage.
///
/// Implementations must be safe to call from concurrently running tests.
/// Permission modes are unix-style bits; backends without permissions may
/// ignore them.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Reads the whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Replaces the file contents. The parent directory must exist.
    fn write(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FsError>;

    /// Reports whether the path exists and what it is.
    fn stat(&self, path: &Path) -> Result<FileKind, FsError>;

    /// Removes a file.
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    /// Creates a directory and all missing parents.
    fn create_dir_all(&self, path: &Path, mode: u32) -> Result<(), FsError>;
}
