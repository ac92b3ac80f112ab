//! Domain value objects: ConflictStrategy, SourceKind, ActionKind.
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! This file defines the types, their string representations, and their
//! `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ConflictStrategy ─────────────────────────────────────────────────────────

/// What to do when an extracted file already exists at the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Confirm interactively; overwrite silently when prompts are disabled.
    #[default]
    Ask,
    /// Never overwrite.
    Skip,
    /// Always overwrite.
    Override,
}

impl ConflictStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Skip => "skip",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "skip" => Ok(Self::Skip),
            "override" | "overwrite" | "replace" => Ok(Self::Override),
            other => Err(DomainError::InvalidStrategy(other.to_string())),
        }
    }
}

// ── SourceKind ───────────────────────────────────────────────────────────────

/// Which resolver produced a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Local,
    Gist,
    GitHub,
    Git,
    Registry,
}

impl SourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Gist => "gist",
            Self::GitHub => "github",
            Self::Git => "git",
            Self::Registry => "registry",
        }
    }

    /// Whether the source has to be fetched into the cache.
    pub const fn is_remote(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ActionKind ───────────────────────────────────────────────────────────────

/// The closed set of action kinds a preset can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Extract,
    Delete,
    Prompt,
    Custom,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Delete => "delete",
            Self::Prompt => "prompt",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("ask".parse::<ConflictStrategy>().unwrap(), ConflictStrategy::Ask);
        assert_eq!("SKIP".parse::<ConflictStrategy>().unwrap(), ConflictStrategy::Skip);
        assert_eq!(
            "Override".parse::<ConflictStrategy>().unwrap(),
            ConflictStrategy::Override
        );
        assert!(matches!(
            "merge".parse::<ConflictStrategy>(),
            Err(DomainError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn strategy_defaults_to_ask() {
        assert_eq!(ConflictStrategy::default(), ConflictStrategy::Ask);
    }

    #[test]
    fn only_local_sources_are_not_remote() {
        assert!(!SourceKind::Local.is_remote());
        assert!(SourceKind::GitHub.is_remote());
        assert!(SourceKind::Registry.is_remote());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SourceKind::GitHub.to_string(), "github");
        assert_eq!(ActionKind::Extract.to_string(), "extract");
        assert_eq!(ConflictStrategy::Override.to_string(), "override");
    }
}
