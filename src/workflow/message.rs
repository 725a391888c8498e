//! Obtaining the commit message: typed by the user or suggested by an AI
//! provider with accept / regenerate / edit.

use tracing::debug;

use crate::ai::{GeneratorFactory, Provider, build_commit_prompt, clean_suggestion, guidance};
use crate::error::{AiError, WorkflowError};
use crate::git::GitRunner;
use crate::git::ops::{staged_diff, staged_stat};

use super::prompter::Prompter;

const AI_CHOICES: [&str; 3] = ["Use this message", "Regenerate", "Edit it"];

/// Everything needed to ask a provider for suggestions.
pub struct AiContext<'a> {
    pub factory: &'a dyn GeneratorFactory,
    pub provider: Provider,
    pub api_key: String,
}

/// Get a non-empty commit message, through the AI path when `ai` is set.
///
/// AI failures are reported and fall back to manual entry; only an empty
/// final message is an error.
pub async fn obtain_message(
    git: &dyn GitRunner,
    prompter: &dyn Prompter,
    ai: Option<&AiContext<'_>>,
    branch: Option<&str>,
) -> Result<String, WorkflowError> {
    let suggested = match ai {
        Some(ctx) => suggest_with_ai(git, prompter, ctx, branch).await?,
        None => None,
    };

    let message = match suggested {
        Some(message) => message,
        None => prompter.input("Commit message", None)?,
    };

    let message = message.trim().to_string();
    if message.is_empty() {
        return Err(WorkflowError::EmptyMessage);
    }
    Ok(message)
}

/// Returns `None` when the user should type the message instead.
async fn suggest_with_ai(
    git: &dyn GitRunner,
    prompter: &dyn Prompter,
    ctx: &AiContext<'_>,
    branch: Option<&str>,
) -> Result<Option<String>, WorkflowError> {
    let generator = match ctx
        .factory
        .ensure_available(ctx.provider)
        .and_then(|()| ctx.factory.create(ctx.provider, &ctx.api_key))
    {
        Ok(generator) => generator,
        Err(e) => {
            report_ai_error(&e);
            return Ok(None);
        }
    };

    let diff = staged_diff(git);
    if diff.is_empty() {
        println!("Nothing staged to describe; enter the message manually.");
        return Ok(None);
    }

    let prompt = build_commit_prompt(&staged_stat(git), &diff, branch);
    debug!("Commit prompt length: {} chars", prompt.len());

    loop {
        println!("Generating commit message with {}...", ctx.provider);

        let suggestion = match generator.generate(&prompt).await {
            Ok(raw) => clean_suggestion(&raw),
            Err(e) => {
                report_ai_error(&e);
                return Ok(None);
            }
        };

        if suggestion.is_empty() {
            report_ai_error(&AiError::EmptyResponse {
                provider: ctx.provider,
            });
            return Ok(None);
        }

        println!();
        for line in suggestion.lines() {
            println!("  {}", line);
        }
        println!();

        match prompter.select("What would you like to do?", &AI_CHOICES, 0)? {
            0 => return Ok(Some(suggestion)),
            1 => continue,
            _ => return Ok(Some(prompter.edit("Commit message", &suggestion)?)),
        }
    }
}

fn report_ai_error(err: &AiError) {
    debug!("AI suggestion failed ({}): {}", err.kind(), err);
    eprintln!("  [AI] {}", guidance(err));
    eprintln!("  Falling back to manual entry.");
}
