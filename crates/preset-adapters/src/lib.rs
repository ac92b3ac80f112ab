//! Infrastructure adapters for preset.
//!
//! This crate implements the ports defined in `preset-core::application::ports`.
//! It contains all external dependencies and I/O operations: the real and
//! in-memory filesystems, the source resolvers with their git cache, and the
//! `preset.toml` importer.

pub mod bus;
pub mod filesystem;
pub mod git;
pub mod importer;
pub mod prompt;
pub mod resolver;

// Re-export commonly used adapters
pub use bus::TracingBus;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::{GitError, GitFetcher, SystemGit};
pub use importer::{MANIFEST_FILE, TomlImporter};
pub use prompt::{Answer, NonInteractivePrompt, ScriptedPrompt};
pub use resolver::{ResolverSettings, chain_with_fetcher, default_chain};
