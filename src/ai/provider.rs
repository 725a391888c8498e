//! Provider selection and generator construction.
//!
//! Each hosted provider gets one [`MessageGenerator`] implementation. The
//! [`GeneratorFactory`] passed in by the caller decides how generators are
//! built, so nothing here touches process-wide state.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AiError, ConfigError};

use super::anthropic::AnthropicGenerator;
use super::gemini::GeminiGenerator;
use super::openai::OpenAiGenerator;

/// Upper bound on generated tokens; a commit message never needs more.
pub const MAX_TOKENS: u32 = 300;

/// Environment variable to override the provider's default model.
const MODEL_ENV_VAR: &str = "AUTOPUSH_MODEL";

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Gemini];

    /// Identifier stored in the config file.
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::Gemini => "gemini-1.5-flash",
        }
    }

    /// Where users manage keys and billing for this provider.
    pub fn console_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://platform.openai.com/account",
            Provider::Anthropic => "https://console.anthropic.com/settings",
            Provider::Gemini => "https://aistudio.google.com/app/apikey",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| ConfigError::UnknownProvider(s.trim().to_string()))
    }
}

/// Produces a commit message suggestion for a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Which provider answers the calls.
    fn provider(&self) -> Provider;

    /// Single-shot prompt/response call. No retry.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Builds generators for the configured provider.
pub trait GeneratorFactory: Send + Sync {
    /// Make sure everything needed to talk to `provider` is present.
    fn ensure_available(&self, provider: Provider) -> Result<(), AiError>;

    /// Build a generator for `provider` using `api_key`.
    fn create(&self, provider: Provider, api_key: &str) -> Result<Box<dyn MessageGenerator>, AiError>;
}

/// Factory that talks to the hosted HTTP APIs.
#[derive(Debug, Default)]
pub struct HttpGeneratorFactory {
    client: OnceLock<Client>,
    base_url: Option<String>,
    model: Option<String>,
}

impl HttpGeneratorFactory {
    /// Factory using the public endpoints and `AUTOPUSH_MODEL` if set.
    pub fn new() -> Self {
        Self {
            model: model_from_env(),
            ..Self::default()
        }
    }

    /// Send requests to `base_url` instead of the provider's public endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Use `model` instead of the provider's default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn client(&self, provider: Provider) -> Result<Client, AiError> {
        if let Some(client) = self.client.get() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::Unavailable {
                provider,
                reason: e.to_string(),
            })?;

        let _ = self.client.set(client.clone());
        Ok(client)
    }

    fn model_for(&self, provider: Provider) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string())
    }
}

impl GeneratorFactory for HttpGeneratorFactory {
    fn ensure_available(&self, provider: Provider) -> Result<(), AiError> {
        self.client(provider).map(|_| ())
    }

    fn create(&self, provider: Provider, api_key: &str) -> Result<Box<dyn MessageGenerator>, AiError> {
        let client = self.client(provider)?;
        let model = self.model_for(provider);
        let base_url = self.base_url.clone();

        debug!("Using {} with model {}", provider, model);

        let generator: Box<dyn MessageGenerator> = match provider {
            Provider::OpenAi => Box::new(OpenAiGenerator::new(client, api_key, model, base_url)),
            Provider::Anthropic => Box::new(AnthropicGenerator::new(client, api_key, model, base_url)),
            Provider::Gemini => Box::new(GeminiGenerator::new(client, api_key, model, base_url)),
        };

        Ok(generator)
    }
}

/// Generate one suggestion with the given provider.
///
/// Runs the explicit availability step first, so a missing capability
/// surfaces as [`AiError::Unavailable`] before any request is made.
pub async fn generate(
    factory: &dyn GeneratorFactory,
    provider: Provider,
    api_key: &str,
    prompt: &str,
) -> Result<String, AiError> {
    factory.ensure_available(provider)?;
    let generator = factory.create(provider, api_key)?;
    generator.generate(prompt).await
}

/// Read the model override, ignoring blank values.
fn model_from_env() -> Option<String> {
    match env::var(MODEL_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        Ok(_) => {
            warn!("{} is set but empty, using provider defaults", MODEL_ENV_VAR);
            None
        }
        Err(_) => None,
    }
}
