pub mod action;
pub mod descriptor;
pub mod options;
pub mod preset;

pub use action::{Action, ActionSpec, ContextualizedAction};
pub use descriptor::PresetDescriptor;
pub use options::ApplierOptions;
pub use preset::Preset;
