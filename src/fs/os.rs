//! Real file system backed by `std::fs`, with atomic writes.

use super::{FileKind, FileSystem, FsError};
use std::fs::{self, DirBuilder, File};
use std::io::{self, Write as IoWrite};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Production [`FileSystem`] operating on the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        debug!(path = %path.display(), "reading fixture");
        fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    /// Writes through a temporary file in the same directory and renames it
    /// into place, so readers never see a partially written fixture.
    fn write(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FsError> {
        debug!(path = %path.display(), bytes = data.len(), mode, "writing fixture");
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;

        temp.write_all(data).map_err(|e| FsError::Io {
            path: path.into(),
            source: e,
        })?;

        set_mode(temp.as_file(), mode).map_err(|e| FsError::from_io(path, e))?;

        temp.persist(path).map_err(|e| FsError::AtomicWrite {
            path: path.into(),
            source: e.error,
        })?;

        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<FileKind, FsError> {
        let metadata = fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(if metadata.is_dir() {
            FileKind::Dir
        } else {
            FileKind::File
        })
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        debug!(path = %path.display(), "removing fixture");
        fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        debug!(path = %path.display(), mode, "creating fixture directory");
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(path).map_err(|e| FsError::from_io(path, e))
    }
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}
