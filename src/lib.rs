//! autopush - stage, commit and push in one step.
//!
//! # Overview
//!
//! autopush drives the installed `git` binary through an interactive
//! add/commit/push loop. Commit messages are typed by hand or suggested by a
//! hosted AI provider (OpenAI, Anthropic or Gemini), and a failed push is
//! remediated once by setting the upstream or rebasing onto the remote.

pub mod ai;
pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod setup;
pub mod upgrade;
pub mod workflow;

// Re-export commonly used types
pub use ai::{Provider, generate};
pub use config::Config;
pub use error::{AiError, ConfigError, PromptError, SetupError, UpgradeError, WorkflowError};
pub use git::{GitOutput, GitRunner, PushOutcome, SystemGit};
pub use workflow::{WorkflowOptions, WorkflowOutcome, run_workflow};
