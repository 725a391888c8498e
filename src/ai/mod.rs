//! AI commit message suggestions from hosted providers.

pub mod anthropic;
pub mod classify;
pub mod gemini;
mod http;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use classify::{AiErrorKind, classify_ai_error, guidance};
pub use prompt::{build_commit_prompt, clean_suggestion};
pub use provider::{
    GeneratorFactory, HttpGeneratorFactory, MAX_TOKENS, MessageGenerator, Provider, generate,
};

#[cfg(test)]
pub use provider::MockMessageGenerator;
