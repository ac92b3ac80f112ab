//! Event bus backed by `tracing`.

use tracing::{debug, info, warn};

use preset_core::application::ports::Bus;

/// Forwards applier messages to the `tracing` subscriber under the
/// `preset::apply` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBus;

impl TracingBus {
    pub fn new() -> Self {
        Self
    }
}

impl Bus for TracingBus {
    fn debug(&self, message: &str) {
        debug!(target: "preset::apply", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "preset::apply", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "preset::apply", "{message}");
    }
}
