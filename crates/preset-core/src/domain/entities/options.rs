use std::path::{Path, PathBuf};

/// Execution-scope configuration for one apply run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplierOptions {
    target: PathBuf,
    interactive: Option<bool>,
}

impl ApplierOptions {
    /// `target` should be absolute; relative paths are kept as given and
    /// resolved against the process working directory by the filesystem.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            interactive: None,
        }
    }

    /// Force prompts on or off regardless of what the preset declares.
    pub fn with_interactive(mut self, interactive: Option<bool>) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn interactive_override(&self) -> Option<bool> {
        self.interactive
    }
}
