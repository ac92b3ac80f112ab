//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `preset-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Resolver`: Turn a raw source string into a local directory
//!   - `Importer`: Load a `Preset` from a resolved directory
//!   - `Filesystem`: File operations against the target project
//!   - `Prompt`: Ask the user questions
//!   - `Bus`: Diagnostic messages
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `PresetApplier::apply` / `PresetApplier::resolve`

pub mod output;

pub use output::{Bus, Filesystem, Importer, Prompt, Resolver};

#[cfg(test)]
pub use output::{MockBus, MockFilesystem, MockImporter, MockPrompt, MockResolver};
