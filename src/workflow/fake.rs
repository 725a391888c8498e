//! Scripted prompter for tests, enabled by the `test-util` feature outside this crate.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::PromptError;

use super::prompter::Prompter;

/// Answers prompts from queues; an exhausted queue reads as closed input.
#[derive(Default)]
pub struct ScriptedPrompter {
    texts: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    selects: RefCell<VecDeque<usize>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for `input`, `edit` or `secret`.
    pub fn text(self, answer: &str) -> Self {
        self.texts.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn choose(self, index: usize) -> Self {
        self.selects.borrow_mut().push_back(index);
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next_text(&self, prompt: &str) -> Result<String, PromptError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.texts.borrow_mut().pop_front().ok_or(PromptError::Closed)
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
        let answer = self.next_text(prompt)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn edit(&self, prompt: &str, _initial: &str) -> Result<String, PromptError> {
        self.next_text(prompt)
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.confirms.borrow_mut().pop_front().ok_or(PromptError::Closed)
    }

    fn select(&self, prompt: &str, _items: &[&str], _default: usize) -> Result<usize, PromptError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.selects.borrow_mut().pop_front().ok_or(PromptError::Closed)
    }

    fn secret(&self, prompt: &str) -> Result<String, PromptError> {
        self.next_text(prompt)
    }
}
