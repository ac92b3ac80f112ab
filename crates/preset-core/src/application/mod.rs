//! Application layer for Preset.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PresetApplier, ResolverChain)
//! - **Handlers**: One function per action kind, dispatched by the applier
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; data rules such as
//! source syntax and dotfile renaming live in `crate::domain`.

pub mod error;
pub mod handlers;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ApplyReport, PresetApplier, ResolverChain};

// Re-export port traits (for adapter implementation)
pub use ports::{Bus, Filesystem, Importer, Prompt, Resolver};

pub use error::ApplicationError;
