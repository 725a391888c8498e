//! Scripted git runner for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::runner::{GitOutput, GitRunner};

/// Replays canned results keyed by the joined argument list.
///
/// Unscripted commands succeed with empty output. When several results are
/// queued for one command they are returned in order, and the last one keeps
/// repeating.
#[derive(Default)]
pub struct ScriptedGit {
    responses: Mutex<HashMap<String, VecDeque<GitOutput>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, args: &str, output: GitOutput) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(args.to_string())
            .or_default()
            .push_back(output);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, args: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == args).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl GitRunner for ScriptedGit {
    fn run(&self, args: &[&str]) -> GitOutput {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => GitOutput::success(""),
        }
    }
}
