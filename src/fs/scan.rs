//! Discovery of fixture files on disk.

use super::FsError;
use crate::naming::parse_file_name;
use crate::target::Target;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A fixture file found under a fixture directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFile {
    /// Path relative to the scanned directory.
    pub path: PathBuf,
    /// Relative path without the target segment: test name, prefix and
    /// extension.
    pub stem: String,
    pub target: Target,
}

/// Scans a directory recursively for fixture files.
///
/// Files whose last name segment is not a target are skipped, as are hidden
/// files and directories. Results are sorted by path.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_fixtures(dir: &Path) -> Result<Vec<FixtureFile>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut fixtures = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(source) => FsError::from_io(&path, source),
                None => FsError::Io {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                },
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let Some(name) = relative.to_str() else {
            continue;
        };
        let name = name.replace('\\', "/");
        if let Some(parsed) = parse_file_name(&name) {
            fixtures.push(FixtureFile {
                path: relative.to_path_buf(),
                stem: parsed.stem.to_string(),
                target: parsed.target,
            });
        }
    }

    Ok(fixtures)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}
