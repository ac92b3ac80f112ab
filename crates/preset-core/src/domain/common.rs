use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

/// A filesystem path guaranteed to stay **below** the directory it is
/// joined onto.
///
/// Template entries, action targets and delete paths are all joined onto a
/// base directory (the preset's template directory or the apply target).
/// Absolute paths and `..` components would escape that base, so both are
/// rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the provided path is absolute or contains `..`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Err(e) = check(&path) {
            panic!("invalid RelativePath {path:?}: {e}");
        }
        Self(path)
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check(&path)?;
        Ok(Self(path))
    }

    /// Join a path segment onto this relative path.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    /// `true` if any component is hidden (starts with `.`), ignoring `.` and `..`.
    pub fn is_hidden(&self) -> bool {
        self.0.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }

    /// Forward-slash rendering, used for glob matching.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume into a `PathBuf`.
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn check(path: &Path) -> Result<(), DomainError> {
    let shown = || path.display().to_string();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(DomainError::AbsolutePathNotAllowed { path: shown() });
            }
            Component::ParentDir => {
                return Err(DomainError::PathEscapesBase { path: shown() });
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        RelativePath::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Suffix marking a template file that materializes as a dotfile.
pub const DOTFILE_SUFFIX: &str = ".dotfile";

/// Rename `name.dotfile` into `.name`.
///
/// Only the final path segment changes: `dir/b.dotfile` becomes `dir/.b`.
/// Paths without the suffix, or whose final segment is the bare suffix, are
/// returned untouched.
pub fn rename_dotfile(input: &str) -> String {
    let (dir, file) = match input.rfind(['/', '\\']) {
        Some(idx) => input.split_at(idx + 1),
        None => ("", input),
    };

    match file.strip_suffix(DOTFILE_SUFFIX) {
        Some(stem) if !stem.is_empty() => format!("{dir}.{stem}"),
        _ => input.to_string(),
    }
}

/// [`rename_dotfile`] over a relative path.
///
/// A rename that would produce `..` keeps the original path.
pub fn rename_dotfile_path(path: &RelativePath) -> RelativePath {
    RelativePath::try_new(rename_dotfile(&path.to_slash_string())).unwrap_or_else(|_| path.clone())
}
