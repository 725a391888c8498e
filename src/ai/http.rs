//! Shared request/response handling for the provider HTTP APIs.

use std::error::Error as StdError;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AiError;

use super::Provider;

/// Send `body` as JSON and decode a successful response into `R`.
///
/// Non-2xx responses become [`AiError::Api`] carrying the provider's own
/// error text so failures can be classified.
pub(crate) async fn post_json<B, R>(provider: Provider, request: RequestBuilder, body: &B) -> Result<R, AiError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| {
            // Endpoint URLs contain words the classifier looks for.
            let e = e.without_url();
            AiError::Transport {
                provider,
                message: error_chain(&e),
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Api {
            provider,
            status: status.as_u16(),
            message: api_error_message(status.canonical_reason(), &body),
        });
    }

    response.json::<R>().await.map_err(|e| AiError::MalformedResponse {
        provider,
        detail: e.to_string(),
    })
}

/// Render an error with all of its sources, e.g.
/// `error sending request: connection reset by peer (os error 104)`.
pub(crate) fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

/// Pull the human-readable parts out of a provider error body.
///
/// All three APIs nest details under `error`: OpenAI uses
/// `message`/`type`/`code`, Anthropic `message`/`type`, Gemini
/// `message`/`status`. Unknown bodies are returned trimmed.
pub(crate) fn api_error_message(reason: Option<&str>, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(error) = value.get("error")
    {
        if let Some(text) = error.as_str() {
            return text.to_string();
        }

        let parts: Vec<&str> = ["message", "type", "code", "status"]
            .iter()
            .filter_map(|key| error.get(*key).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" | ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("no response body").to_string()
    } else {
        trimmed.chars().take(500).collect()
    }
}
