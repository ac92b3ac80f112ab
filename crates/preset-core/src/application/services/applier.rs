//! Preset Applier - main application orchestrator.
//!
//! This service coordinates the entire apply workflow:
//! 1. Resolve the raw source into a local directory
//! 2. Import the preset manifest
//! 3. Run each action in declaration order
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use tracing::{info, instrument, warn};

use crate::{
    application::{
        handlers::{self, HandlerContext},
        ports::{Bus, Filesystem, Importer, Prompt},
        services::ResolverChain,
    },
    domain::{ApplierOptions, ContextualizedAction, Preset, PresetDescriptor},
    error::PresetResult,
};

/// Summary of one apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub preset: String,
    /// Actions that ran to completion.
    pub executed: usize,
    /// Actions whose condition was false.
    pub skipped: usize,
    /// Actions that failed without stopping the run.
    pub failed: usize,
}

impl ApplyReport {
    pub fn total(&self) -> usize {
        self.executed + self.skipped + self.failed
    }
}

/// Main apply service.
///
/// Every collaborator is a constructor parameter.
pub struct PresetApplier {
    resolvers: ResolverChain,
    importer: Box<dyn Importer>,
    filesystem: Box<dyn Filesystem>,
    prompt: Box<dyn Prompt>,
    bus: Box<dyn Bus>,
}

impl PresetApplier {
    pub fn new(
        resolvers: ResolverChain,
        importer: Box<dyn Importer>,
        filesystem: Box<dyn Filesystem>,
        prompt: Box<dyn Prompt>,
        bus: Box<dyn Bus>,
    ) -> Self {
        Self {
            resolvers,
            importer,
            filesystem,
            prompt,
            bus,
        }
    }

    /// Resolve a source without applying it.
    pub fn resolve(&self, raw: &str) -> PresetResult<PresetDescriptor> {
        self.resolvers.resolve(raw)
    }

    /// Resolve and import a preset without running its actions.
    pub fn load(&self, raw: &str) -> PresetResult<Preset> {
        let descriptor = self.resolve(raw)?;
        self.importer.load(&descriptor)
    }

    /// Resolve, import and apply a preset onto `options.target`.
    ///
    /// Not transactional: files written before a stopping error stay.
    #[instrument(
        skip_all,
        fields(
            source = %raw,
            target = %options.target().display()
        )
    )]
    pub fn apply(&self, raw: &str, options: &ApplierOptions) -> PresetResult<ApplyReport> {
        let mut preset = self.load(raw)?;
        info!(preset = %preset.name, actions = preset.actions.len(), "Preset loaded");
        self.run(&mut preset, options)
    }

    /// Run the actions of an already loaded preset.
    pub fn run(&self, preset: &mut Preset, options: &ApplierOptions) -> PresetResult<ApplyReport> {
        let mut report = ApplyReport {
            preset: preset.name.clone(),
            ..Default::default()
        };
        let actions = preset.actions.clone();

        for (index, action) in actions.iter().enumerate() {
            let label = action.label();

            if !action.should_run(preset) {
                self.bus
                    .info(&format!("Skipping '{}' (condition not met)", label));
                report.skipped += 1;
                continue;
            }

            self.bus.debug(&format!("Running action #{} '{}'", index + 1, label));
            let resolved = action.contextualize(preset);

            match self.dispatch(&resolved, preset, options) {
                Ok(Some((key, value))) => {
                    preset.context.insert(key, value);
                    report.executed += 1;
                }
                Ok(None) => report.executed += 1,
                Err(e) if e.stops_execution() => {
                    warn!(action = %label, error = %e, "Action failed, stopping");
                    return Err(e);
                }
                Err(e) => {
                    self.bus.warn(&format!("Action '{}' failed: {}", label, e));
                    report.failed += 1;
                }
            }
        }

        info!(
            executed = report.executed,
            skipped = report.skipped,
            failed = report.failed,
            "Preset applied"
        );
        Ok(report)
    }

    /// Static dispatch over the closed set of action kinds.
    ///
    /// Returns the prompt answer to store, if any.
    fn dispatch(
        &self,
        action: &ContextualizedAction,
        preset: &Preset,
        options: &ApplierOptions,
    ) -> PresetResult<Option<(String, serde_json::Value)>> {
        let cx = HandlerContext {
            preset,
            options,
            filesystem: self.filesystem.as_ref(),
            prompt: self.prompt.as_ref(),
            bus: self.bus.as_ref(),
        };

        match action {
            ContextualizedAction::Extract(a) => handlers::extract::handle(a, &cx).map(|_| None),
            ContextualizedAction::Delete(a) => handlers::delete::handle(a, &cx).map(|_| None),
            ContextualizedAction::Prompt(a) => handlers::prompt::handle(a, &cx).map(Some),
            ContextualizedAction::Custom(a) => handlers::custom::handle(a, &cx).map(|_| None),
        }
    }
}
