//! Unified error handling for Preset Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Preset Core operations.
#[derive(Debug, Error, Clone)]
pub enum PresetError {
    /// Errors from the domain layer (invalid identifiers, manifest values).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution, loading, execution).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PresetError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Preset".into(),
                "Please report it along with the output of `preset -vvv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Manifest => ErrorCategory::Manifest,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the applier must abort instead of logging and continuing.
    ///
    /// Domain, configuration and internal errors always stop; application
    /// errors decide for themselves.
    pub fn stops_execution(&self) -> bool {
        match self {
            Self::Application(e) => e.stops_execution(),
            _ => true,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::LockPoisoned | ApplicationError::FetchFailed { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Manifest,
    NotFound,
    Network,
    Execution,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PresetResult<T> = Result<T, PresetError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> PresetResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> PresetResult<T> {
        self.map_err(|e| PresetError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_stop_execution() {
        let err: PresetError = DomainError::EmptySource.into();
        assert!(err.stops_execution());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn filesystem_errors_do_not_stop_execution() {
        let err: PresetError = ApplicationError::FilesystemError {
            path: PathBuf::from("a.txt"),
            reason: "denied".into(),
        }
        .into();
        assert!(!err.stops_execution());
    }

    #[test]
    fn directory_onto_file_stops_execution() {
        let err: PresetError = ApplicationError::directory_onto_file("tpl", "out.txt").into();
        assert!(err.stops_execution());
        assert_eq!(err.category(), ErrorCategory::Execution);
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.context("reading manifest").unwrap_err();
        assert!(matches!(err, PresetError::Internal { ref message } if message.contains("boom")));
    }
}
