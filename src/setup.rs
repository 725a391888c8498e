//! `autopush setup`: choose an AI provider and store its API key.

use std::path::Path;

use crate::ai::Provider;
use crate::config::Config;
use crate::error::SetupError;
use crate::workflow::Prompter;

/// Ask for a provider and key, then overwrite the config at `path`.
pub fn run_setup(prompter: &dyn Prompter, path: &Path) -> Result<Config, SetupError> {
    let choices: Vec<&str> = Provider::ALL.iter().map(|p| p.id()).collect();
    let answer = prompter.input(
        &format!("AI provider ({})", choices.join(", ")),
        Some(Provider::OpenAi.id()),
    )?;

    let provider: Provider = answer.trim().parse()?;

    println!("Get a {} API key at {}", provider.as_str(), provider.console_url());
    let api_key = prompter.secret(&format!("{} API key", provider.as_str()))?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(SetupError::EmptyApiKey);
    }

    let config = Config::new(provider, api_key);
    config.save_to(path)?;

    println!("Saved {} configuration to {}", provider.as_str(), path.display());
    Ok(config)
}
