//! Interactive prompts.
//!
//! The workflow asks questions through [`Prompter`] so tests can script the
//! answers; [`TerminalPrompter`] is the dialoguer-backed implementation.

use dialoguer::{Confirm, Input, Password, Select};

use crate::error::PromptError;

pub trait Prompter {
    /// Free text with an optional default shown to the user.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Free text pre-filled with `initial` for editing.
    fn edit(&self, prompt: &str, initial: &str) -> Result<String, PromptError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, PromptError>;

    /// Hidden input, for secrets.
    fn secret(&self, prompt: &str) -> Result<String, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn edit(&self, prompt: &str, initial: &str) -> Result<String, PromptError> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, PromptError> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn secret(&self, prompt: &str) -> Result<String, PromptError> {
        Ok(Password::new().with_prompt(prompt).allow_empty_password(true).interact()?)
    }
}
