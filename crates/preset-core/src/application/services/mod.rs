//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a source" or "apply a preset".

pub mod applier;
pub mod resolver_chain;

pub use applier::{ApplyReport, PresetApplier};
pub use resolver_chain::ResolverChain;
