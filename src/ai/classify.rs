//! Classification of AI provider failures into actionable categories.

use std::fmt;

use crate::error::AiError;

use super::Provider;

/// What went wrong with an AI call, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiErrorKind {
    CreditsExhausted,
    InvalidKey,
    RateLimited,
    Unknown,
}

impl AiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiErrorKind::CreditsExhausted => "credits exhausted",
            AiErrorKind::InvalidKey => "invalid key",
            AiErrorKind::RateLimited => "rate limited",
            AiErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify provider failure text.
///
/// Case-insensitive substring checks, first match wins:
/// credits/quota/insufficient, then invalid/auth/401, then rate/429.
pub fn classify_ai_error(message: &str) -> AiErrorKind {
    let text = message.to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

    if has_any(&["credits", "quota", "insufficient"]) {
        AiErrorKind::CreditsExhausted
    } else if has_any(&["invalid", "auth", "401"]) {
        AiErrorKind::InvalidKey
    } else if has_any(&["rate", "429"]) {
        AiErrorKind::RateLimited
    } else {
        AiErrorKind::Unknown
    }
}

impl AiError {
    /// Classify using the upstream text only, never our own wrapper wording.
    pub fn kind(&self) -> AiErrorKind {
        match self {
            AiError::Api {
                status, message, ..
            } => classify_ai_error(&format!("{} {}", status, message)),
            AiError::Transport { message, .. } => classify_ai_error(message),
            AiError::Unavailable { .. }
            | AiError::EmptyResponse { .. }
            | AiError::MalformedResponse { .. } => AiErrorKind::Unknown,
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            AiError::Unavailable { provider, .. }
            | AiError::Transport { provider, .. }
            | AiError::Api { provider, .. }
            | AiError::EmptyResponse { provider }
            | AiError::MalformedResponse { provider, .. } => *provider,
        }
    }
}

/// User-facing explanation of an AI failure with the next step to take.
pub fn guidance(err: &AiError) -> String {
    let provider = err.provider();
    match err.kind() {
        AiErrorKind::CreditsExhausted => format!(
            "Your {} account is out of credits or quota. Add billing at {} or switch provider with `autopush setup`.",
            provider,
            provider.console_url()
        ),
        AiErrorKind::InvalidKey => format!(
            "{} rejected the API key. Create a new key at {} and run `autopush setup`.",
            provider,
            provider.console_url()
        ),
        AiErrorKind::RateLimited => format!(
            "{} is rate limiting requests. Wait a moment and regenerate, or write the message yourself.",
            provider
        ),
        AiErrorKind::Unknown => err.to_string(),
    }
}
