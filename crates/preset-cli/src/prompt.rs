//! Terminal prompt backed by `dialoguer`.

use dialoguer::{Confirm, FuzzySelect, Input, Select, theme::ColorfulTheme};

use preset_core::{
    application::{ApplicationError, ports::Prompt},
    error::PresetResult,
};

/// Above this many choices `select` becomes fuzzy-searchable.
const FUZZY_THRESHOLD: usize = 8;

pub struct DialoguerPrompt {
    theme: ColorfulTheme,
}

impl DialoguerPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

fn failed(e: dialoguer::Error) -> preset_core::error::PresetError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
    .into()
}

impl Prompt for DialoguerPrompt {
    fn confirm(&self, message: &str, default: bool) -> PresetResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(failed)
    }

    fn input(&self, message: &str, default: &str) -> PresetResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(failed)
    }

    fn select(&self, message: &str, choices: &[String], default: usize) -> PresetResult<String> {
        let index = if choices.len() > FUZZY_THRESHOLD {
            FuzzySelect::with_theme(&self.theme)
                .with_prompt(message)
                .items(choices)
                .default(default)
                .interact()
        } else {
            Select::with_theme(&self.theme)
                .with_prompt(message)
                .items(choices)
                .default(default)
                .interact()
        }
        .map_err(failed)?;

        choices.get(index).cloned().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: format!("selection {index} is out of range"),
            }
            .into()
        })
    }
}
