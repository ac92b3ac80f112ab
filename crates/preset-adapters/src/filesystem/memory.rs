//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use preset_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::RelativePath,
    error::PresetResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep a handle while the
/// applier owns a boxed copy.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}

/// `a/./b` and `a/b` are the same key.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_ancestors(parent);
            }
            inner.files.insert(path, content.into());
        }
    }

    /// Builder-style [`add_file`](Self::add_file).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(&normalize(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.inner
            .read()
            .is_ok_and(|inner| inner.files.contains_key(&path) || inner.is_dir(&path))
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.inner
            .read()
            .is_ok_and(|inner| inner.files.contains_key(&path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.inner.read().is_ok_and(|inner| inner.is_dir(&path))
    }

    fn create_dir_all(&self, path: &Path) -> PresetResult<()> {
        let path = normalize(path);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if let Some(file) = path.ancestors().find(|a| inner.files.contains_key(*a)) {
            return Err(ApplicationError::FilesystemError {
                path: file.to_path_buf(),
                reason: "Not a directory".into(),
            }
            .into());
        }

        inner.add_ancestors(&path);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PresetResult<()> {
        let (from, to) = (normalize(from), normalize(to));
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let content = inner
            .files
            .get(&from)
            .cloned()
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: from.clone(),
                reason: "No such file".into(),
            })?;

        if inner.is_dir(&to) {
            return Err(ApplicationError::FilesystemError {
                path: to,
                reason: "Is a directory".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: to.clone(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(to, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PresetResult<()> {
        let path = normalize(path);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner
            .files
            .remove(&path)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path,
                    reason: "No such file".into(),
                }
                .into()
            })
    }

    fn remove_dir_all(&self, path: &Path) -> PresetResult<()> {
        let path = normalize(path);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.directories.retain(|p| !p.starts_with(&path));
        inner.files.retain(|p, _| !p.starts_with(&path));

        Ok(())
    }

    fn list_files(&self, root: &Path, include_hidden: bool) -> PresetResult<Vec<RelativePath>> {
        let root = normalize(root);
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let mut files = Vec::new();
        for path in inner.files.keys() {
            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }
            let relative = RelativePath::try_new(relative)?;
            if include_hidden || !relative.is_hidden() {
                files.push(relative);
            }
        }
        Ok(files)
    }
}
