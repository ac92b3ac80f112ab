use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::SourceKind;

/// A resolved preset source.
///
/// Produced by a resolver once the source has been materialized on local
/// storage. `directory` exists and is readable by the time a descriptor is
/// handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetDescriptor {
    directory: PathBuf,
    raw_input: String,
    kind: SourceKind,
    subpath: Option<String>,
    git_ref: Option<String>,
}

impl PresetDescriptor {
    pub fn new(directory: impl Into<PathBuf>, raw_input: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            directory: directory.into(),
            raw_input: raw_input.into(),
            kind,
            subpath: None,
            git_ref: None,
        }
    }

    pub fn with_subpath(mut self, subpath: Option<String>) -> Self {
        self.subpath = subpath.filter(|s| !s.is_empty());
        self
    }

    pub fn with_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref.filter(|s| !s.is_empty());
        self
    }

    /// Absolute directory holding the preset.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The identifier exactly as the user typed it.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }

    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// Last path component of the directory, used as a default preset name.
    pub fn default_name(&self) -> String {
        self.directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.raw_input.clone())
    }
}

impl fmt::Display for PresetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.raw_input, self.kind)?;
        if let Some(r) = &self.git_ref {
            write!(f, " @{r}")?;
        }
        Ok(())
    }
}
