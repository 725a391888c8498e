//! Error types for autopush modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::ai::Provider;

/// Errors from the config store.
///
/// Reading never produces one of these: a missing or corrupt file loads as an
/// empty record. Only resolving the location and writing can fail.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory. Set AUTOPUSH_HOME to choose a config location.")]
    NoHomeDir,

    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Unknown provider '{0}'. Choose one of: openai, anthropic, gemini")]
    UnknownProvider(String),
}

/// Errors from AI provider calls.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("{provider} client is unavailable: {reason}")]
    Unavailable { provider: Provider, reason: String },

    #[error("{provider} request failed: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("{provider} returned an empty suggestion")]
    EmptyResponse { provider: Provider },

    #[error("{provider} response had an unexpected shape: {detail}")]
    MalformedResponse { provider: Provider, detail: String },
}

/// Errors from interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt failed: {0}")]
    Interaction(#[from] dialoguer::Error),

    #[error("Input was closed before an answer was given")]
    Closed,
}

/// Fatal conditions of the add/commit/push workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("git was not found on PATH. Install git and try again.")]
    GitNotInstalled,

    #[error("Not a git repository. Run autopush from inside a git working tree.")]
    NotARepository,

    #[error("Failed to read working tree status: {0}")]
    StatusFailed(String),

    #[error("Failed to stage files: {0}")]
    StagingFailed(String),

    #[error("Commit message cannot be empty")]
    EmptyMessage,

    #[error("Failed to commit: {0}")]
    CommitFailed(String),

    #[error("Push failed: {0}")]
    PushFailed(String),

    #[error("Automatic rebase failed; resolve the conflicts manually and push again")]
    RebaseFailed(String),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from the setup command.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("API key cannot be empty")]
    EmptyApiKey,

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from the upgrade and uninstall commands.
#[derive(Error, Debug)]
pub enum UpgradeError {
    #[error("cargo was not found on PATH. autopush upgrades itself with `cargo install`.")]
    CargoNotInstalled,

    #[error("Failed to look up the latest version: {0}")]
    VersionLookup(#[source] reqwest::Error),

    #[error("Registry reported an invalid version '{0}': {1}")]
    InvalidVersion(String, #[source] semver::Error),

    #[error("Failed to run cargo: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("cargo {command} exited with code {code}")]
    PackageManagerFailed { command: String, code: i32 },

    #[error("Failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
