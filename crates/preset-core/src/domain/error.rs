// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `PresetError`, which is `Clone`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Source identifier errors
    // ========================================================================
    #[error("Invalid preset source '{input}': {reason}")]
    InvalidSource { input: String, reason: String },

    #[error("Empty preset source")]
    EmptySource,

    // ========================================================================
    // Manifest / action errors
    // ========================================================================
    #[error("Invalid action #{index}: {reason}")]
    InvalidAction { index: usize, reason: String },

    #[error("Invalid conflict strategy '{0}' (expected ask, skip or override)")]
    InvalidStrategy(String),

    #[error("Invalid prompt kind '{0}' (expected input, confirm or select)")]
    InvalidPromptKind(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves its base directory: {path}")]
    PathEscapesBase { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSource { input, .. } => vec![
                format!("Could not interpret '{}' as a preset source", input),
                "Accepted forms:".into(),
                "  • ./local/path".into(),
                "  • owner/repo[/subpath][@ref]".into(),
                "  • gist:<id>".into(),
                "  • git+https://host/repo.git[#ref]".into(),
                "  • name or scope:name (registry)".into(),
            ],
            Self::EmptySource => vec!["Pass a preset source, e.g. `preset apply owner/repo`".into()],
            Self::InvalidAction { index, .. } => vec![
                format!("Check action #{} in the preset manifest", index),
                "Each action needs a `type` of extract, delete, prompt or run".into(),
            ],
            Self::InvalidStrategy(_) => {
                vec!["Use one of: strategy = \"ask\" | \"skip\" | \"override\"".into()]
            }
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' must be relative to the preset or target directory", path),
            ],
            Self::PathEscapesBase { path } => vec![
                format!("'{}' must not contain '..'", path),
                "Presets may only read their template directory and write inside the target".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSource { .. } | Self::EmptySource => ErrorCategory::Validation,
            Self::InvalidAction { .. }
            | Self::InvalidStrategy(_)
            | Self::InvalidPromptKind(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Manifest,
            Self::AbsolutePathNotAllowed { .. } | Self::PathEscapesBase { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Manifest,
}
