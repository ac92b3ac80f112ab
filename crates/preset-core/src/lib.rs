//! Preset Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Preset
//! project templating tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           preset-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (PresetApplier, ResolverChain)        │
//! │   Handlers: extract/delete/prompt/custom│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Resolver, Importer, Filesystem, Prompt,│
//! │  Bus)                                   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    preset-adapters (Infrastructure)     │
//! │ (resolvers, TomlImporter, filesystems)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (PresetDescriptor, Preset, Action,      │
//! │  Contextualized, source parsing)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use preset_core::prelude::*;
//!
//! fn apply(applier: &PresetApplier) -> PresetResult<()> {
//!     let options = ApplierOptions::new("/path/to/project").with_interactive(Some(false));
//!     let report = applier.apply("owner/repo@v1", &options)?;
//!     println!("{} actions executed", report.executed);
//!     Ok(())
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ApplyReport, PresetApplier, ResolverChain,
        ports::{Bus, Filesystem, Importer, Prompt, Resolver},
    };
    pub use crate::domain::{
        Action, ActionSpec, ApplierOptions, ConflictStrategy, Contextualized, CustomAction,
        DeleteAction, ExtractAction, Preset, PresetContext, PresetDescriptor, PromptAction,
        PromptKind, RelativePath, SourceKind, contextualize,
    };
    pub use crate::error::{PresetError, PresetResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
