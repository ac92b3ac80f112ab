// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Preset.
//!
//! Pure data and logic: descriptors, presets, actions, contextualized values
//! and source identifier parsing. All I/O (filesystem, git, prompts) goes
//! through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Few crates**: std, thiserror, and serde for manifest shapes
//! - **Immutable entities**: a loaded `Preset` only changes through its context
//!
pub mod common;
pub mod contextualize;
pub mod entities;
pub mod error;
pub mod source;
pub mod value_objects;

pub use common::{DOTFILE_SUFFIX, RelativePath, rename_dotfile, rename_dotfile_path};
pub use contextualize::{Contextualized, PresetContext, contextualize, value_to_string};
pub use entities::{
    Action, ActionSpec, ApplierOptions, ContextualizedAction, Preset, PresetDescriptor,
    action::{
        CustomAction, CustomError, DeleteAction, ExtractAction, OneOrMany, PromptAction,
        PromptKind, ResolvedDelete, ResolvedExtract, ResolvedPrompt,
    },
    preset::{DEFAULT_TEMPLATE_DIRECTORY, PresetBuilder},
};
pub use error::{DomainError, ErrorCategory};
pub use source::{GistSource, GitHubSource, GitSource, RegistrySource, is_url_like, encode_cache_key};
pub use value_objects::{ActionKind, ConflictStrategy, SourceKind};
