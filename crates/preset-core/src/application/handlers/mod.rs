//! Kind-specific action handlers.
//!
//! The applier contextualizes an action and dispatches it here with a
//! `match`. Handlers only read the preset; the prompt handler returns its
//! answer instead of writing it into the context.

pub mod custom;
pub mod delete;
pub mod extract;
pub mod prompt;

use std::path::{Path, PathBuf};

use crate::application::ports::{Bus, Filesystem, Prompt};
use crate::domain::{ApplierOptions, Preset, RelativePath};
use crate::error::PresetResult;

/// Everything a handler may touch while running one action.
pub struct HandlerContext<'a> {
    pub preset: &'a Preset,
    pub options: &'a ApplierOptions,
    pub filesystem: &'a dyn Filesystem,
    pub prompt: &'a dyn Prompt,
    pub bus: &'a dyn Bus,
}

impl HandlerContext<'_> {
    pub fn is_interactive(&self) -> bool {
        self.preset.is_interactive(self.options)
    }

    /// `options.target / relative`, rejecting absolute paths.
    pub fn target_path(&self, relative: &str) -> PresetResult<PathBuf> {
        let relative = RelativePath::try_new(relative)?;
        Ok(self.options.target().join(relative))
    }

    /// Path shown to the user: relative to the target when possible.
    pub fn display_path<'p>(&self, path: &'p Path) -> std::path::Display<'p> {
        path.strip_prefix(self.options.target())
            .unwrap_or(path)
            .display()
    }
}
