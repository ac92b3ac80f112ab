//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `preset-adapters` crate provides implementations; the CLI adds a
//! terminal `Prompt`.

use std::path::Path;

use crate::domain::{Preset, PresetDescriptor, RelativePath};
use crate::error::PresetResult;

/// Port for turning a raw source string into a local preset directory.
///
/// Implemented by the resolvers in `preset_adapters::resolver`.
#[cfg_attr(test, mockall::automock)]
pub trait Resolver: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Pure syntactic check (local: existence check). No network access.
    fn supports(&self, input: &str) -> bool;

    /// Materialize the source and describe where it lives.
    ///
    /// On success the returned directory exists and is readable.
    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor>;
}

/// Port for loading a preset from a resolved directory.
#[cfg_attr(test, mockall::automock)]
pub trait Importer: Send + Sync {
    fn load(&self, descriptor: &PresetDescriptor) -> PresetResult<Preset>;
}

/// Port for diagnostic messages emitted while applying.
#[cfg_attr(test, mockall::automock)]
pub trait Bus: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Port for asking the user questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    fn confirm(&self, message: &str, default: bool) -> PresetResult<bool>;

    fn input(&self, message: &str, default: &str) -> PresetResult<String>;

    /// Returns the chosen entry of `choices`; `default` is an index into it.
    fn select(&self, message: &str, choices: &[String], default: usize) -> PresetResult<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `preset_adapters::filesystem::LocalFilesystem` (production)
/// - `preset_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories. Succeeds if present.
    fn create_dir_all(&self, path: &Path) -> PresetResult<()>;

    /// Copy a regular file, replacing `to` if it exists.
    fn copy_file(&self, from: &Path, to: &Path) -> PresetResult<()>;

    fn remove_file(&self, path: &Path) -> PresetResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PresetResult<()>;

    /// Every regular file beneath `root`, relative to it.
    ///
    /// Entries with a hidden component are skipped unless `include_hidden`.
    /// Order is unspecified.
    fn list_files(&self, root: &Path, include_hidden: bool) -> PresetResult<Vec<RelativePath>>;
}
