//! Prompt adapters that never touch a terminal.

use std::collections::VecDeque;
use std::sync::Mutex;

use preset_core::{
    application::{ApplicationError, ports::Prompt},
    error::PresetResult,
};

/// Answers every question with its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractivePrompt;

impl NonInteractivePrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for NonInteractivePrompt {
    fn confirm(&self, _message: &str, default: bool) -> PresetResult<bool> {
        Ok(default)
    }

    fn input(&self, _message: &str, default: &str) -> PresetResult<String> {
        Ok(default.to_string())
    }

    fn select(&self, _message: &str, choices: &[String], default: usize) -> PresetResult<String> {
        choices
            .get(default)
            .or_else(|| choices.first())
            .cloned()
            .ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: "no choices to select from".into(),
                }
                .into()
            })
    }
}

/// One canned answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Text(String),
    /// Index into the offered choices.
    Select(usize),
}

/// Replays queued answers in order; useful for driving interactive
/// presets from tests or scripts.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Messages asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    fn next(&self, message: &str) -> PresetResult<Answer> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }
        let mut answers = self
            .answers
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        answers.pop_front().ok_or_else(|| {
            ApplicationError::PromptFailed {
                reason: format!("no scripted answer for '{message}'"),
            }
            .into()
        })
    }
}

fn mismatch(message: &str, answer: &Answer) -> preset_core::error::PresetError {
    ApplicationError::PromptFailed {
        reason: format!("scripted answer {answer:?} does not fit '{message}'"),
    }
    .into()
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str, _default: bool) -> PresetResult<bool> {
        match self.next(message)? {
            Answer::Confirm(value) => Ok(value),
            other => Err(mismatch(message, &other)),
        }
    }

    fn input(&self, message: &str, _default: &str) -> PresetResult<String> {
        match self.next(message)? {
            Answer::Text(value) => Ok(value),
            other => Err(mismatch(message, &other)),
        }
    }

    fn select(&self, message: &str, choices: &[String], _default: usize) -> PresetResult<String> {
        match self.next(message)? {
            Answer::Select(index) => choices
                .get(index)
                .cloned()
                .ok_or_else(|| mismatch(message, &Answer::Select(index))),
            other => Err(mismatch(message, &other)),
        }
    }
}
