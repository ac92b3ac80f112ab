//! `preset.toml` manifest importer.
//!
//! # Directory layout expected
//!
//! ```text
//! my-preset/
//! ├── preset.toml              ← manifest (required)
//! └── templates/               ← default template directory
//!     ├── README.md
//!     └── gitignore.dotfile    ← extracted as .gitignore
//! ```
//!
//! # `preset.toml` format
//!
//! ```toml
//! [preset]
//! name        = "my-preset"     # optional; defaults to the directory name
//! templates   = "templates"     # optional; may use {{ placeholders }}
//! interactive = true            # optional
//!
//! [context]                     # optional initial context
//! framework = "axum"
//!
//! [[actions]]
//! type    = "prompt"            # prompt | extract | copy | delete | run
//! name    = "project"
//! message = "Project name?"
//! kind    = "input"             # input | confirm | select
//! default = "demo"
//!
//! [[actions]]
//! type     = "extract"
//! title    = "Base files"
//! input    = ["base", "*.md"]   # string or array
//! target   = "{{ project }}"
//! strategy = "skip"             # ask | skip | override
//! dotfiles = true
//! if       = "{{ with_docs }}"  # optional condition
//!
//! [[actions]]
//! type    = "run"
//! command = "git"
//! args    = ["init"]
//! ```
//!
//! Any string containing `{{` is evaluated against the preset context right
//! before its action runs, so prompt answers are visible to later actions.

use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, instrument};

use preset_core::{
    application::{ApplicationError, ports::Importer},
    domain::{
        Action, ActionSpec, ConflictStrategy, Contextualized, CustomAction, DeleteAction,
        DomainError, ExtractAction, OneOrMany, Preset, PresetContext, PresetDescriptor,
        PromptAction, PromptKind, value_to_string,
    },
    error::PresetResult,
};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "preset.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `preset.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PresetManifest {
    #[serde(default)]
    pub preset: PresetSection,
    #[serde(default)]
    pub context: toml::Table,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// `[preset]` section.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PresetSection {
    pub name: Option<String>,
    pub templates: Option<String>,
    pub interactive: Option<bool>,
}

/// One entry under `[[actions]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ActionEntry {
    pub title: Option<String>,
    /// `if = "..."` or `if = true`.
    #[serde(rename = "if")]
    pub condition: Option<toml::Value>,
    #[serde(flatten)]
    pub body: ActionBody,
}

/// Kind-specific fields, selected by `type`.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionBody {
    #[serde(alias = "copy")]
    Extract {
        input: OneOrMany<String>,
        target: Option<String>,
        strategy: Option<String>,
        #[serde(default)]
        dotfiles: bool,
    },
    Delete {
        #[serde(alias = "path")]
        paths: OneOrMany<String>,
    },
    Prompt {
        name: String,
        message: String,
        kind: Option<String>,
        default: Option<toml::Value>,
        #[serde(default)]
        choices: Vec<String>,
    },
    Run {
        command: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

// ── Importer ──────────────────────────────────────────────────────────────────

/// Loads a [`Preset`] from the `preset.toml` at the root of a descriptor's
/// directory.
#[derive(Debug, Clone)]
pub struct TomlImporter {
    manifest_name: String,
}

impl TomlImporter {
    pub fn new() -> Self {
        Self {
            manifest_name: MANIFEST_FILE.to_string(),
        }
    }

    /// Read a differently named manifest.
    pub fn with_manifest_name(name: impl Into<String>) -> Self {
        Self {
            manifest_name: name.into(),
        }
    }

    /// Parse manifest text. Exposed for tooling that validates manifests.
    pub fn parse(raw: &str) -> Result<PresetManifest, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Turn a parsed manifest into a preset.
    pub fn build(descriptor: &PresetDescriptor, manifest: PresetManifest) -> PresetResult<Preset> {
        let context = manifest
            .context
            .into_iter()
            .map(|(key, value)| {
                serde_json::to_value(value)
                    .map(|v| (key.clone(), v))
                    .map_err(|e| ApplicationError::LoadFailed {
                        path: descriptor.directory().to_path_buf(),
                        reason: format!("context value '{key}': {e}"),
                    })
            })
            .collect::<Result<PresetContext, _>>()?;

        let actions = manifest
            .actions
            .into_iter()
            .enumerate()
            .map(|(index, entry)| convert_action(index + 1, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Preset::builder(descriptor.clone())
            .context(context)
            .actions(actions);
        if let Some(name) = manifest.preset.name {
            builder = builder.name(name);
        }
        if let Some(templates) = manifest.preset.templates {
            builder = builder.template_directory(contextual(templates));
        }
        if let Some(interactive) = manifest.preset.interactive {
            builder = builder.interactive(interactive);
        }
        Ok(builder.build())
    }
}

impl Default for TomlImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for TomlImporter {
    #[instrument(skip(self), fields(dir = %descriptor.directory().display()))]
    fn load(&self, descriptor: &PresetDescriptor) -> PresetResult<Preset> {
        let manifest_path = descriptor.directory().join(&self.manifest_name);
        if !manifest_path.is_file() {
            return Err(load_failed(&manifest_path, "manifest not found"));
        }

        let raw = std::fs::read_to_string(&manifest_path)
            .map_err(|e| load_failed(&manifest_path, format!("failed to read: {e}")))?;
        let manifest = Self::parse(&raw)
            .map_err(|e| load_failed(&manifest_path, format!("failed to parse: {e}")))?;

        let preset = Self::build(descriptor, manifest)?;
        debug!(name = %preset.name, actions = preset.actions.len(), "loaded preset");
        Ok(preset)
    }
}

fn load_failed(path: &Path, reason: impl Into<String>) -> preset_core::error::PresetError {
    ApplicationError::LoadFailed {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn convert_action(index: usize, entry: ActionEntry) -> Result<Action, DomainError> {
    let spec = match entry.body {
        ActionBody::Extract {
            input,
            target,
            strategy,
            dotfiles,
        } => {
            let strategy = strategy
                .as_deref()
                .map(ConflictStrategy::from_str)
                .transpose()?
                .unwrap_or_default();
            let mut extract = ExtractAction::many(input.into_vec().into_iter().map(contextual))
                .strategy(strategy)
                .with_dotfiles(dotfiles);
            if let Some(target) = target {
                extract = extract.to(contextual(target));
            }
            ActionSpec::Extract(extract)
        }
        ActionBody::Delete { paths } => {
            ActionSpec::Delete(DeleteAction::many(paths.into_vec().into_iter().map(contextual)))
        }
        ActionBody::Prompt {
            name,
            message,
            kind,
            default,
            choices,
        } => {
            let kind = prompt_kind(index, kind.as_deref(), default, choices)?;
            ActionSpec::Prompt(PromptAction::new(name, contextual(message), kind))
        }
        ActionBody::Run { command, args } => ActionSpec::Custom(run_action(command, args)),
    };

    let mut action = Action::new(spec);
    action.title = entry.title.or_else(|| match &action.spec {
        ActionSpec::Custom(run) => Some(run.name.clone()),
        _ => None,
    });
    if let Some(condition) = entry.condition {
        action = action.when(condition_of(index, condition)?);
    }
    Ok(action)
}

fn prompt_kind(
    index: usize,
    kind: Option<&str>,
    default: Option<toml::Value>,
    choices: Vec<String>,
) -> Result<PromptKind, DomainError> {
    let invalid_default = |expected: &str| DomainError::InvalidAction {
        index,
        reason: format!("prompt default must be {expected}"),
    };

    match kind.unwrap_or("input") {
        "input" | "text" => {
            let default = match default {
                None => None,
                Some(toml::Value::String(s)) => Some(s),
                Some(other) => Some(other.to_string()),
            };
            Ok(PromptKind::Input { default })
        }
        "confirm" => {
            let default = match default {
                None => false,
                Some(toml::Value::Boolean(b)) => b,
                Some(_) => return Err(invalid_default("a boolean")),
            };
            Ok(PromptKind::Confirm { default })
        }
        "select" => {
            if choices.is_empty() {
                return Err(DomainError::InvalidAction {
                    index,
                    reason: "select prompt needs `choices`".into(),
                });
            }
            let default = match default {
                None => None,
                Some(toml::Value::String(s)) if choices.contains(&s) => Some(s),
                Some(_) => return Err(invalid_default("one of `choices`")),
            };
            Ok(PromptKind::Select { choices, default })
        }
        other => Err(DomainError::InvalidPromptKind(other.to_string())),
    }
}

fn condition_of(index: usize, value: toml::Value) -> Result<Contextualized<bool>, DomainError> {
    match value {
        toml::Value::Boolean(b) => Ok(Contextualized::literal(b)),
        toml::Value::String(s) if s.contains("{{") => Ok(Contextualized::deferred(move |ctx| {
            is_truthy(&interpolate(&s, ctx))
        })),
        toml::Value::String(s) => Ok(Contextualized::literal(is_truthy(&s))),
        _ => Err(DomainError::InvalidAction {
            index,
            reason: "`if` must be a string or a boolean".into(),
        }),
    }
}

/// A `run` action: execute a program in the target directory.
fn run_action(command: String, args: Vec<String>) -> CustomAction {
    let title = std::iter::once(command.as_str())
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    CustomAction::new(title.clone(), move |preset, options| {
        let program = interpolate(&command, &preset.context);
        let args: Vec<String> = args
            .iter()
            .map(|arg| interpolate(arg, &preset.context))
            .collect();

        std::fs::create_dir_all(options.target())?;
        let status = Command::new(&program)
            .args(&args)
            .current_dir(options.target())
            .status()?;

        if !status.success() {
            return Err(format!("`{}` exited with {}", title, status).into());
        }
        Ok(())
    })
}

/// Literal unless the string has placeholders.
fn contextual(raw: String) -> Contextualized<String> {
    if raw.contains("{{") {
        Contextualized::deferred(move |ctx| interpolate(&raw, ctx))
    } else {
        Contextualized::literal(raw)
    }
}

/// Replace `{{ key }}` placeholders with context values.
///
/// Missing keys render as the empty string; an unterminated `{{` is kept
/// verbatim.
pub fn interpolate(template: &str, context: &PresetContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);
        let key = rest[start + 2..start + 2 + len].trim();
        if let Some(value) = context.get(key) {
            out.push_str(&value_to_string(value));
        }
        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    out
}

/// Condition truthiness: empty, `false`, `0`, `no`, `off` and `null` are false.
pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off" | "null"
    )
}
