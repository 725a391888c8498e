//! The interactive add / commit / push workflow.
//!
//! # Flow
//!
//! 1. Check the working directory is a repository
//! 2. Report the remote and branch, switching branch when asked
//! 3. Stop early when the working tree is clean
//! 4. Ask which files to stage and stage them
//! 5. Obtain a commit message (manual or AI-suggested)
//! 6. Commit
//! 7. Unless disabled, confirm and push through the remediation ladder

pub mod message;
pub mod prompter;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

use tracing::debug;

use crate::error::WorkflowError;
use crate::git::ops::{self, parse_file_selection, remote_url};
use crate::git::push::rebase_instructions;
use crate::git::{
    BranchSwitch, GitRunner, PushOutcome, PushTarget, current_branch, default_remote, is_repository,
    push_with_remediation, switch_branch,
};

pub use message::{AiContext, obtain_message};
pub use prompter::{Prompter, TerminalPrompter};

/// Per-run switches taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub no_push: bool,
    pub no_ai: bool,
    pub force_push: bool,
    pub branch: Option<String>,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The working tree was clean; nothing was staged or committed.
    NothingToCommit,
    /// Committed without pushing (disabled, declined, or nowhere to push).
    Committed,
    /// Committed and pushed.
    Pushed(PushOutcome),
}

/// Run the workflow against `git`, asking questions through `prompter`.
///
/// `ai` is `None` when suggestions are disabled or not configured.
pub async fn run_workflow(
    git: &dyn GitRunner,
    prompter: &dyn Prompter,
    ai: Option<&AiContext<'_>>,
    opts: &WorkflowOptions,
) -> Result<WorkflowOutcome, WorkflowError> {
    if !is_repository(git) {
        return Err(WorkflowError::NotARepository);
    }

    let remote = default_remote(git);
    match &remote {
        Some(name) => match remote_url(git, name) {
            Some(url) => println!("Remote: {} ({})", name, url),
            None => println!("Remote: {}", name),
        },
        None => println!("Remote: none configured"),
    }

    if let Some(name) = opts.branch.as_deref() {
        match switch_branch(git, name) {
            BranchSwitch::AlreadyOn => {}
            BranchSwitch::Switched => println!("Switched to branch '{}'", name),
            BranchSwitch::Created => println!("Created and switched to branch '{}'", name),
            BranchSwitch::Failed(stderr) => {
                eprintln!("Could not switch to branch '{}': {}", name, stderr);
                eprintln!("Staying on the current branch.");
            }
        }
    }

    let branch = current_branch(git);
    println!("Branch: {}", branch.as_deref().unwrap_or("(detached HEAD)"));

    let status = ops::status(git);
    if !status.ok {
        return Err(WorkflowError::StatusFailed(status.stderr));
    }
    if status.stdout.is_empty() {
        println!("Nothing to commit, working tree clean.");
        return Ok(WorkflowOutcome::NothingToCommit);
    }

    println!();
    println!("Changes:");
    for line in status.stdout.lines() {
        println!("  {}", line);
    }
    println!();

    let answer = prompter.input("Files to stage (space separated, '.' for all)", Some("."))?;
    let files = parse_file_selection(&answer);
    debug!("Staging {:?}", files);

    let staged = ops::stage(git, &files);
    if !staged.ok {
        return Err(WorkflowError::StagingFailed(staged.stderr));
    }

    if ai.is_none() && !opts.no_ai {
        println!("Tip: run `autopush setup` to get AI-generated commit messages.");
    }

    let message = obtain_message(git, prompter, ai, branch.as_deref()).await?;

    let committed = ops::commit(git, &message);
    if !committed.ok {
        return Err(WorkflowError::CommitFailed(committed.stderr));
    }
    println!("Committed: {}", message.lines().next().unwrap_or_default());

    if opts.no_push {
        println!("Skipping push (--no-push).");
        return Ok(WorkflowOutcome::Committed);
    }

    let (Some(remote), Some(branch)) = (remote, branch) else {
        println!("No remote or no current branch; skipping push.");
        return Ok(WorkflowOutcome::Committed);
    };

    if !prompter.confirm(&format!("Push to {}/{}?", remote, branch), true)? {
        println!("Push skipped.");
        return Ok(WorkflowOutcome::Committed);
    }

    let target = PushTarget {
        remote,
        branch,
        force: opts.force_push,
    };

    match push_with_remediation(git, &target) {
        PushOutcome::RebaseFailed { stderr } => {
            eprintln!("{}", stderr);
            eprintln!("{}", rebase_instructions(&target.branch));
            Err(WorkflowError::RebaseFailed(stderr))
        }
        PushOutcome::Failed { stderr } => Err(WorkflowError::PushFailed(stderr)),
        outcome => {
            println!("Pushed to {}/{}.", target.remote, target.branch);
            Ok(WorkflowOutcome::Pushed(outcome))
        }
    }
}
