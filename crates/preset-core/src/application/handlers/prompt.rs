//! Ask the user a question.

use serde_json::Value;
use tracing::instrument;

use crate::application::ApplicationError;
use crate::application::handlers::HandlerContext;
use crate::domain::{PromptKind, ResolvedPrompt};
use crate::error::PresetResult;

/// Produce the `(name, answer)` pair for the applier to store.
///
/// Non-interactive runs answer with the declared default and never touch the
/// prompt port.
#[instrument(skip_all, fields(name = %action.name))]
pub fn handle(action: &ResolvedPrompt, cx: &HandlerContext<'_>) -> PresetResult<(String, Value)> {
    let interactive = cx.is_interactive();

    let answer = match &action.kind {
        PromptKind::Input { default } => {
            let default = default.as_deref().unwrap_or_default();
            let value = if interactive {
                cx.prompt.input(&action.message, default)?
            } else {
                default.to_string()
            };
            Value::String(value)
        }
        PromptKind::Confirm { default } => {
            let value = if interactive {
                cx.prompt.confirm(&action.message, *default)?
            } else {
                *default
            };
            Value::Bool(value)
        }
        PromptKind::Select { choices, default } => {
            let index = default
                .as_ref()
                .and_then(|d| choices.iter().position(|c| c == d))
                .unwrap_or(0);
            let value = if !interactive {
                default
                    .clone()
                    .or_else(|| choices.first().cloned())
                    .unwrap_or_default()
            } else if choices.is_empty() {
                return Err(ApplicationError::Execution {
                    message: format!("Select prompt '{}' has no choices", action.name),
                    stops_execution: false,
                }
                .into());
            } else {
                cx.prompt.select(&action.message, choices, index)?
            };
            Value::String(value)
        }
    };

    if !interactive {
        cx.bus.debug(&format!("Using default for '{}'", action.name));
    }

    Ok((action.name.clone(), answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBus, MockFilesystem, MockPrompt};
    use crate::domain::{ApplierOptions, Preset, PresetDescriptor, SourceKind};

    fn ask(prompt: &MockPrompt, interactive: bool, kind: PromptKind) -> PresetResult<(String, Value)> {
        let preset = Preset::builder(PresetDescriptor::new("/preset", "./preset", SourceKind::Local))
            .interactive(interactive)
            .build();
        let options = ApplierOptions::new("/target");
        let mut bus = MockBus::new();
        bus.expect_debug().return_const(());
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &MockFilesystem::new(),
            prompt,
            bus: &bus,
        };
        handle(
            &ResolvedPrompt {
                name: "answer".into(),
                message: "Question?".into(),
                kind,
            },
            &cx,
        )
    }

    #[test]
    fn non_interactive_uses_defaults() {
        let mut prompt = MockPrompt::new();
        prompt.expect_input().never();
        prompt.expect_confirm().never();
        prompt.expect_select().never();

        let (_, v) = ask(&prompt, false, PromptKind::Input { default: Some("demo".into()) }).unwrap();
        assert_eq!(v, Value::from("demo"));

        let (_, v) = ask(&prompt, false, PromptKind::Confirm { default: true }).unwrap();
        assert_eq!(v, Value::from(true));

        let (_, v) = ask(
            &prompt,
            false,
            PromptKind::Select {
                choices: vec!["a".into(), "b".into()],
                default: None,
            },
        )
        .unwrap();
        assert_eq!(v, Value::from("a"));
    }

    #[test]
    fn interactive_asks_the_port() {
        let mut prompt = MockPrompt::new();
        prompt
            .expect_input()
            .withf(|msg, default| msg == "Question?" && default.is_empty())
            .returning(|_, _| Ok("typed".into()));

        let (name, v) = ask(&prompt, true, PromptKind::Input { default: None }).unwrap();
        assert_eq!(name, "answer");
        assert_eq!(v, Value::from("typed"));
    }

    #[test]
    fn select_passes_default_index() {
        let mut prompt = MockPrompt::new();
        prompt
            .expect_select()
            .withf(|_, choices, index| choices.len() == 3 && *index == 2)
            .returning(|_, choices, _| Ok(choices[1].clone()));

        let (_, v) = ask(
            &prompt,
            true,
            PromptKind::Select {
                choices: vec!["x".into(), "y".into(), "z".into()],
                default: Some("z".into()),
            },
        )
        .unwrap();
        assert_eq!(v, Value::from("y"));
    }

    #[test]
    fn prompt_failure_stops_execution() {
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().returning(|_, _| {
            Err(ApplicationError::PromptFailed {
                reason: "not a terminal".into(),
            }
            .into())
        });

        let err = ask(&prompt, true, PromptKind::Confirm { default: false }).unwrap_err();
        assert!(err.stops_execution());
    }
}
