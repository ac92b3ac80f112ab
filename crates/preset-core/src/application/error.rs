//! Application layer errors.
//!
//! These errors represent failures in orchestration: resolving a source,
//! loading a manifest, running actions. Invalid data is `DomainError` from
//! `crate::domain`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No resolver accepted the input.
    #[error("No resolver can handle '{input}'")]
    Unresolvable { input: String },

    /// The matching resolver could not materialize the source.
    #[error("Failed to fetch '{input}': {reason}")]
    FetchFailed { input: String, reason: String },

    /// The manifest could not be read or parsed.
    #[error("Failed to load preset at {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    /// An action failed while running.
    #[error("{message}")]
    Execution {
        message: String,
        stops_execution: bool,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The prompt backend failed (closed terminal, interrupted, ...).
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// A custom action returned an error.
    #[error("Custom action '{name}' failed: {reason}")]
    CustomActionFailed { name: String, reason: String },

    /// Shared state access failed (lock poisoned, etc.).
    #[error("Shared state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Extracting a template directory onto an existing regular file.
    pub fn directory_onto_file(template: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        Self::Execution {
            message: format!(
                "Cannot extract directory {} onto existing file {}",
                template.as_ref().display(),
                target.as_ref().display()
            ),
            stops_execution: true,
        }
    }

    /// Whether the applier must abort.
    pub fn stops_execution(&self) -> bool {
        match self {
            Self::Execution {
                stops_execution, ..
            } => *stops_execution,
            Self::FilesystemError { .. } => false,
            _ => true,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unresolvable { input } => vec![
                format!("'{}' is not an existing directory or a known source form", input),
                "Try: ./path/to/preset, owner/repo, gist:<id> or git+https://host/repo.git".into(),
            ],
            Self::FetchFailed { .. } => vec![
                "Check your network connection and that the repository exists".into(),
                "Private repositories need git credentials configured".into(),
                "Run with -vv to see the git output".into(),
            ],
            Self::LoadFailed { path, .. } => vec![
                format!("Check {}", path.display()),
                "A preset needs a preset.toml manifest at its root".into(),
            ],
            Self::Execution { .. } => vec![
                "Files written before the failure were kept".into(),
                "Fix the conflict and run the preset again".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run with --no-interaction to use default answers".into(),
            ],
            Self::CustomActionFailed { name, .. } => vec![
                format!("Inspect the '{}' step in the preset manifest", name),
            ],
            Self::LockPoisoned => vec![
                "Shared state is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unresolvable { .. } => ErrorCategory::NotFound,
            Self::FetchFailed { .. } => ErrorCategory::Network,
            Self::LoadFailed { .. } => ErrorCategory::Manifest,
            Self::Execution { .. } | Self::CustomActionFailed { .. } | Self::PromptFailed { .. } => {
                ErrorCategory::Execution
            }
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
