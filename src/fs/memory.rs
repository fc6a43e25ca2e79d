//! In-memory file system for exercising the fixture tool without a disk.

use super::{FileKind, FileSystem, FsError};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Entry {
    File { data: Vec<u8>, mode: u32 },
    Dir { mode: u32 },
}

/// A [`FileSystem`] that keeps files and directories in a map.
///
/// Paths are compared literally; there is no normalization of `.` or `..`.
/// Paths registered with [`MemoryFileSystem::deny`] fail every operation
/// with [`FsError::PermissionDenied`].
///
/// # Examples
///
/// ```
/// use golden::fs::{FileSystem, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.insert_file("testdata/case.golden", b"golden");
/// assert_eq!(fs.read(Path::new("testdata/case.golden")).unwrap(), b"golden");
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    entries: Mutex<BTreeMap<PathBuf, Entry>>,
    denied: Mutex<BTreeSet<PathBuf>>,
    mutations: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a file, creating its parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, data: &[u8]) {
        let path = path.as_ref();
        let mut entries = self.lock();
        if let Some(parent) = path.parent() {
            for dir in ancestors_top_down(parent) {
                entries
                    .entry(dir.to_path_buf())
                    .or_insert(Entry::Dir { mode: 0o755 });
            }
        }
        entries.insert(
            path.to_path_buf(),
            Entry::File {
                data: data.to_vec(),
                mode: 0o644,
            },
        );
    }

    /// Makes every operation on `path` fail with a permission error.
    pub fn deny(&self, path: impl Into<PathBuf>) {
        self.denied
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into());
    }

    /// Returns the contents of a file, or `None` if it is absent or a directory.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.lock().get(path.as_ref()) {
            Some(Entry::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    /// Returns the permission bits an entry was created with.
    pub fn mode(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.lock().get(path.as_ref()).map(|entry| match entry {
            Entry::File { mode, .. } | Entry::Dir { mode } => *mode,
        })
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.lock().get(path.as_ref()), Some(Entry::Dir { .. }))
    }

    /// All stored paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    /// Number of write, remove and create-dir calls that reached the store.
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_access(&self, path: &Path) -> Result<(), FsError> {
        let denied = self.denied.lock().unwrap_or_else(|e| e.into_inner());
        if denied.contains(path) {
            return Err(FsError::PermissionDenied { path: path.into() });
        }
        Ok(())
    }

    fn mutated(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Yields the non-root ancestors of `path`, outermost first, including `path`.
fn ancestors_top_down(path: &Path) -> Vec<&Path> {
    let mut dirs: Vec<&Path> = path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty() && p.parent().is_some())
        .collect();
    dirs.reverse();
    dirs
}

fn ensure_parent(entries: &BTreeMap<PathBuf, Entry>, path: &Path) -> Result<(), FsError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.parent().is_none() {
        return Ok(());
    }
    match entries.get(parent) {
        Some(Entry::Dir { .. }) => Ok(()),
        Some(Entry::File { .. }) => Err(FsError::NotADirectory {
            path: parent.into(),
        }),
        None => Err(FsError::NotFound {
            path: parent.into(),
        }),
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.check_access(path)?;
        match self.lock().get(path) {
            Some(Entry::File { data, .. }) => Ok(data.clone()),
            Some(Entry::Dir { .. }) => Err(FsError::Io {
                path: path.into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
            }),
            None => Err(FsError::NotFound { path: path.into() }),
        }
    }

    fn write(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), FsError> {
        self.check_access(path)?;
        let mut entries = self.lock();
        ensure_parent(&entries, path)?;
        if let Some(Entry::Dir { .. }) = entries.get(path) {
            return Err(FsError::Io {
                path: path.into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
            });
        }
        entries.insert(
            path.to_path_buf(),
            Entry::File {
                data: data.to_vec(),
                mode,
            },
        );
        drop(entries);
        self.mutated();
        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<FileKind, FsError> {
        self.check_access(path)?;
        match self.lock().get(path) {
            Some(Entry::File { .. }) => Ok(FileKind::File),
            Some(Entry::Dir { .. }) => Ok(FileKind::Dir),
            None => Err(FsError::NotFound { path: path.into() }),
        }
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        self.check_access(path)?;
        let mut entries = self.lock();
        match entries.get(path) {
            Some(Entry::File { .. }) => {
                entries.remove(path);
            }
            Some(Entry::Dir { .. }) => {
                return Err(FsError::Io {
                    path: path.into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
                });
            }
            None => return Err(FsError::NotFound { path: path.into() }),
        }
        drop(entries);
        self.mutated();
        Ok(())
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        self.check_access(path)?;
        let mut entries = self.lock();
        for dir in ancestors_top_down(path) {
            match entries.get(dir) {
                Some(Entry::Dir { .. }) => {}
                Some(Entry::File { .. }) => {
                    return Err(FsError::NotADirectory { path: dir.into() });
                }
                None => {
                    entries.insert(dir.to_path_buf(), Entry::Dir { mode });
                }
            }
        }
        drop(entries);
        self.mutated();
        Ok(())
    }
}
