//! Declared preset actions.
//!
//! ```text
//! Action
//! ├── title       Option<String>           diagnostics only
//! ├── condition   Contextualized<bool>     false → skipped
//! └── spec        ActionSpec
//!     ├── Extract(ExtractAction)           copy template files into the target
//!     ├── Delete(DeleteAction)             remove paths from the target
//!     ├── Prompt(PromptAction)             ask the user, store the answer
//!     └── Custom(CustomAction)             opaque user function
//! ```
//!
//! Every string field that names a path is a [`Contextualized<String>`] and
//! is only evaluated by [`Action::contextualize`], right before dispatch.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::contextualize::{Contextualized, contextualize};
use crate::domain::entities::options::ApplierOptions;
use crate::domain::entities::preset::Preset;
use crate::domain::value_objects::{ActionKind, ConflictStrategy};

/// A value declared either once or as a list.
///
/// Normalized with [`OneOrMany::into_vec`]; handlers only ever see sequences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

// ── Action ───────────────────────────────────────────────────────────────────

/// One declared step of a preset.
#[derive(Debug, Clone)]
pub struct Action {
    pub title: Option<String>,
    pub condition: Contextualized<bool>,
    pub spec: ActionSpec,
}

/// Kind-specific payload of an [`Action`].
#[derive(Debug, Clone)]
pub enum ActionSpec {
    Extract(ExtractAction),
    Delete(DeleteAction),
    Prompt(PromptAction),
    Custom(CustomAction),
}

impl Action {
    pub fn new(spec: ActionSpec) -> Self {
        Self {
            title: None,
            condition: Contextualized::literal(true),
            spec,
        }
    }

    pub fn extract(action: ExtractAction) -> Self {
        Self::new(ActionSpec::Extract(action))
    }

    pub fn delete(action: DeleteAction) -> Self {
        Self::new(ActionSpec::Delete(action))
    }

    pub fn prompt(action: PromptAction) -> Self {
        Self::new(ActionSpec::Prompt(action))
    }

    pub fn custom(action: CustomAction) -> Self {
        Self::new(ActionSpec::Custom(action))
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Only run when `condition` evaluates to `true`.
    pub fn when(mut self, condition: impl Into<Contextualized<bool>>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn kind(&self) -> ActionKind {
        match &self.spec {
            ActionSpec::Extract(_) => ActionKind::Extract,
            ActionSpec::Delete(_) => ActionKind::Delete,
            ActionSpec::Prompt(_) => ActionKind::Prompt,
            ActionSpec::Custom(_) => ActionKind::Custom,
        }
    }

    /// Human label for logs: the title, or the kind.
    pub fn label(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| self.kind().as_str().to_string())
    }

    /// Evaluate the condition against the preset.
    pub fn should_run(&self, preset: &Preset) -> bool {
        contextualize(preset, &self.condition)
    }

    /// Evaluate every contextualized field against the preset.
    pub fn contextualize(&self, preset: &Preset) -> ContextualizedAction {
        match &self.spec {
            ActionSpec::Extract(a) => ContextualizedAction::Extract(ResolvedExtract {
                inputs: a.input.iter().map(|i| contextualize(preset, i)).collect(),
                target: contextualize(preset, &a.target),
                strategy: a.strategy,
                dotfiles: a.dotfiles,
            }),
            ActionSpec::Delete(a) => ContextualizedAction::Delete(ResolvedDelete {
                paths: a.paths.iter().map(|p| contextualize(preset, p)).collect(),
            }),
            ActionSpec::Prompt(a) => ContextualizedAction::Prompt(ResolvedPrompt {
                name: a.name.clone(),
                message: contextualize(preset, &a.message),
                kind: a.kind.clone(),
            }),
            ActionSpec::Custom(a) => ContextualizedAction::Custom(a.clone()),
        }
    }
}

// ── Extract ──────────────────────────────────────────────────────────────────

/// Copy files from the preset's template directory into the target.
#[derive(Debug, Clone)]
pub struct ExtractAction {
    /// Relative files, directories or globs, in declaration order.
    pub input: Vec<Contextualized<String>>,
    /// Destination relative to the apply target.
    pub target: Contextualized<String>,
    pub strategy: ConflictStrategy,
    /// Include hidden entries when enumerating directories and globs.
    pub dotfiles: bool,
}

impl ExtractAction {
    /// Extract a single file, directory or glob.
    pub fn new(input: impl Into<Contextualized<String>>) -> Self {
        Self::many([input.into()])
    }

    /// Extract several entries, in order.
    pub fn many<I, V>(inputs: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Contextualized<String>>,
    {
        Self {
            input: inputs.into_iter().map(Into::into).collect(),
            target: Contextualized::literal(".".to_string()),
            strategy: ConflictStrategy::default(),
            dotfiles: false,
        }
    }

    /// Build from a manifest declaration; a single value and a one-element
    /// list produce the same action.
    pub fn declared(input: OneOrMany<Contextualized<String>>) -> Self {
        Self::many(input.into_vec())
    }

    pub fn to(mut self, target: impl Into<Contextualized<String>>) -> Self {
        self.target = target.into();
        self
    }

    pub fn strategy(mut self, strategy: ConflictStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_dotfiles(mut self, dotfiles: bool) -> Self {
        self.dotfiles = dotfiles;
        self
    }
}

/// [`ExtractAction`] after contextualization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExtract {
    pub inputs: Vec<String>,
    pub target: String,
    pub strategy: ConflictStrategy,
    pub dotfiles: bool,
}

// ── Delete ───────────────────────────────────────────────────────────────────

/// Remove paths (or glob matches) from the target directory.
#[derive(Debug, Clone)]
pub struct DeleteAction {
    pub paths: Vec<Contextualized<String>>,
}

impl DeleteAction {
    pub fn new(path: impl Into<Contextualized<String>>) -> Self {
        Self::many([path.into()])
    }

    pub fn many<I, V>(paths: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Contextualized<String>>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn declared(paths: OneOrMany<Contextualized<String>>) -> Self {
        Self::many(paths.into_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDelete {
    pub paths: Vec<String>,
}

// ── Prompt ───────────────────────────────────────────────────────────────────

/// Shape of the question asked by a prompt action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Input { default: Option<String> },
    Confirm { default: bool },
    Select { choices: Vec<String>, default: Option<String> },
}

/// Ask the user and store the answer under `name` in the preset context.
#[derive(Debug, Clone)]
pub struct PromptAction {
    pub name: String,
    pub message: Contextualized<String>,
    pub kind: PromptKind,
}

impl PromptAction {
    pub fn new(name: impl Into<String>, message: impl Into<Contextualized<String>>, kind: PromptKind) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompt {
    pub name: String,
    pub message: String,
    pub kind: PromptKind,
}

// ── Custom ───────────────────────────────────────────────────────────────────

/// Error type returned by custom action functions.
pub type CustomError = Box<dyn Error + Send + Sync>;

type CustomFn = Arc<dyn Fn(&Preset, &ApplierOptions) -> Result<(), CustomError> + Send + Sync>;

/// An opaque, user-declared function.
#[derive(Clone)]
pub struct CustomAction {
    pub name: String,
    run: CustomFn,
}

impl CustomAction {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&Preset, &ApplierOptions) -> Result<(), CustomError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    pub fn run(&self, preset: &Preset, options: &ApplierOptions) -> Result<(), CustomError> {
        (self.run)(preset, options)
    }
}

impl fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomAction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ── Contextualized form ──────────────────────────────────────────────────────

/// An action whose fields have all been evaluated.
#[derive(Debug, Clone)]
pub enum ContextualizedAction {
    Extract(ResolvedExtract),
    Delete(ResolvedDelete),
    Prompt(ResolvedPrompt),
    Custom(CustomAction),
}
