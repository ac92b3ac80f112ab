use std::path::PathBuf;

use crate::domain::contextualize::{Contextualized, PresetContext, contextualize};
use crate::domain::entities::action::Action;
use crate::domain::entities::descriptor::PresetDescriptor;
use crate::domain::entities::options::ApplierOptions;
use crate::domain::{DomainError, RelativePath};

/// Default directory, relative to the preset root, holding template files.
pub const DEFAULT_TEMPLATE_DIRECTORY: &str = "templates";

/// A fully loaded unit of work.
///
/// Built once per invocation by an importer. Only `context` changes
/// afterwards, and only through the applier storing prompt answers.
#[derive(Debug, Clone)]
pub struct Preset {
    pub descriptor: PresetDescriptor,
    pub name: String,
    pub template_directory: Contextualized<String>,
    pub context: PresetContext,
    pub interactive: bool,
    pub actions: Vec<Action>,
}

impl Preset {
    pub fn builder(descriptor: PresetDescriptor) -> PresetBuilder {
        PresetBuilder::new(descriptor)
    }

    /// Absolute template root: preset directory joined with the
    /// contextualized template directory.
    pub fn template_root(&self) -> Result<PathBuf, DomainError> {
        let relative = RelativePath::try_new(contextualize(self, &self.template_directory))?;
        Ok(self.descriptor.directory().join(relative))
    }

    /// Whether prompts may be shown, honoring an override in `options`.
    pub fn is_interactive(&self, options: &ApplierOptions) -> bool {
        options.interactive_override().unwrap_or(self.interactive)
    }
}

/// Builder for [`Preset`].
#[derive(Debug)]
pub struct PresetBuilder {
    descriptor: PresetDescriptor,
    name: Option<String>,
    template_directory: Contextualized<String>,
    context: PresetContext,
    interactive: bool,
    actions: Vec<Action>,
}

impl PresetBuilder {
    fn new(descriptor: PresetDescriptor) -> Self {
        Self {
            descriptor,
            name: None,
            template_directory: Contextualized::literal(DEFAULT_TEMPLATE_DIRECTORY.to_string()),
            context: PresetContext::new(),
            interactive: true,
            actions: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn template_directory(mut self, dir: impl Into<Contextualized<String>>) -> Self {
        self.template_directory = dir.into();
        self
    }

    pub fn context(mut self, context: PresetContext) -> Self {
        self.context = context;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn build(self) -> Preset {
        let name = self
            .name
            .unwrap_or_else(|| self.descriptor.default_name());
        Preset {
            descriptor: self.descriptor,
            name,
            template_directory: self.template_directory,
            context: self.context,
            interactive: self.interactive,
            actions: self.actions,
        }
    }
}
