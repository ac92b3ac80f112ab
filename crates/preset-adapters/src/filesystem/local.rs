//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use preset_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::RelativePath,
    error::{PresetError, PresetResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> PresetResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PresetResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, "copy file"))
    }

    fn remove_file(&self, path: &Path) -> PresetResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> PresetResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn list_files(&self, root: &Path, include_hidden: bool) -> PresetResult<Vec<RelativePath>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            // The root itself may live in a hidden directory (caches, temp dirs).
            .filter_entry(|e| e.depth() == 0 || include_hidden || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).map_err(|_| {
                ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("not beneath {}", root.display()),
                }
            })?;
            files.push(RelativePath::try_new(relative)?);
        }

        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PresetError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub/.hidden")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "b").unwrap();
        fs::write(dir.path().join("sub/.hidden/c.txt"), "c").unwrap();
        dir
    }

    fn sorted(mut files: Vec<RelativePath>) -> Vec<String> {
        files.sort();
        files.iter().map(RelativePath::to_slash_string).collect()
    }

    #[test]
    fn list_files_skips_hidden_by_default() {
        let dir = tree();
        let files = LocalFilesystem.list_files(dir.path(), false).unwrap();
        assert_eq!(sorted(files), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn list_files_with_hidden() {
        let dir = tree();
        let files = LocalFilesystem.list_files(dir.path(), true).unwrap();
        assert_eq!(
            sorted(files),
            vec![".env", "a.txt", "sub/.hidden/c.txt", "sub/b.txt"]
        );
    }

    #[test]
    fn copy_replaces_existing() {
        let dir = tree();
        let fs_ = LocalFilesystem::new();
        fs_.copy_file(&dir.path().join("a.txt"), &dir.path().join("sub/b.txt"))
            .unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("sub/b.txt")).unwrap(), "a");
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("x/y/z");
        LocalFilesystem.create_dir_all(&nested).unwrap();
        LocalFilesystem.create_dir_all(&nested).unwrap();
        assert!(LocalFilesystem.is_dir(&nested));
    }

    #[test]
    fn io_errors_are_filesystem_errors() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem.remove_file(&dir.path().join("missing")).unwrap_err();
        assert!(!err.stops_execution());
    }
}
