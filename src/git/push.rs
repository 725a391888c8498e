//! Push with scripted remediation.
//!
//! A failed plain push is classified by its stderr and answered with at most
//! one remediation: set the upstream, or rebase onto the remote and push again.
//! Everything else is reported back to the caller.

use tracing::debug;

use super::runner::GitRunner;

/// Why a plain push failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushFailure {
    /// The branch has no upstream configured.
    NoUpstream,
    /// The remote has commits the local branch lacks.
    Rejected,
    /// Anything else (auth, network, hooks...).
    Other,
}

/// Classify push stderr. The no-upstream check runs first, so text matching
/// both categories is treated as no-upstream.
pub fn classify_push_failure(stderr: &str) -> PushFailure {
    let text = stderr.to_lowercase();

    if text.contains("no upstream") {
        PushFailure::NoUpstream
    } else if text.contains("rejected")
        || text.contains("non-fast-forward")
        || text.contains("fetch first")
    {
        PushFailure::Rejected
    } else {
        PushFailure::Other
    }
}

/// Where to push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub remote: String,
    pub branch: String,
    pub force: bool,
}

/// Final result of the push ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Plain push succeeded.
    Pushed,
    /// Forced push succeeded.
    Forced,
    /// Push succeeded after setting the upstream.
    UpstreamSet,
    /// Push succeeded after rebasing onto the remote.
    Rebased,
    /// The automatic rebase failed; the user has to resolve it.
    RebaseFailed { stderr: String },
    /// The push failed and no remediation applied or the retry failed.
    Failed { stderr: String },
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PushOutcome::Pushed | PushOutcome::Forced | PushOutcome::UpstreamSet | PushOutcome::Rebased
        )
    }
}

/// Push the current branch, remediating a missing upstream or a
/// non-fast-forward rejection once.
///
/// Steps:
/// 1. `--force`: `git push --force <remote> <branch>`, terminal either way
/// 2. `git push`
/// 3. no upstream: `git push --set-upstream <remote> <branch>`, terminal
/// 4. rejected: `git pull --rebase <remote> <branch>`, then `git push` once
/// 5. anything else: failed
pub fn push_with_remediation(git: &dyn GitRunner, target: &PushTarget) -> PushOutcome {
    let remote = target.remote.as_str();
    let branch = target.branch.as_str();

    if target.force {
        println!("  Force pushing to {}/{}...", remote, branch);
        let out = git.run(&["push", "--force", remote, branch]);
        return if out.ok {
            PushOutcome::Forced
        } else {
            PushOutcome::Failed { stderr: out.stderr }
        };
    }

    let first = git.run(&["push"]);
    if first.ok {
        return PushOutcome::Pushed;
    }

    let failure = classify_push_failure(&first.stderr);
    debug!("push failed ({:?}): {}", failure, first.stderr);

    match failure {
        PushFailure::NoUpstream => {
            println!("  No upstream branch; setting upstream to {}/{}", remote, branch);
            let out = git.run(&["push", "--set-upstream", remote, branch]);
            if out.ok {
                PushOutcome::UpstreamSet
            } else {
                PushOutcome::Failed { stderr: out.stderr }
            }
        }
        PushFailure::Rejected => {
            println!("  Remote has new commits; rebasing onto {}/{}", remote, branch);
            let pull = git.run(&["pull", "--rebase", remote, branch]);
            if !pull.ok {
                return PushOutcome::RebaseFailed { stderr: pull.stderr };
            }

            let retry = git.run(&["push"]);
            if retry.ok {
                PushOutcome::Rebased
            } else {
                PushOutcome::Failed {
                    stderr: retry.stderr,
                }
            }
        }
        PushFailure::Other => PushOutcome::Failed {
            stderr: first.stderr,
        },
    }
}

/// Steps for finishing a rebase the tool could not complete.
pub fn rebase_instructions(branch: &str) -> String {
    format!(
        "Resolve the conflicts, then run:\n  \
         git add <resolved files>\n  \
         git rebase --continue\n  \
         git push\n\
         Or abandon the rebase with: git rebase --abort (your commit stays on {})",
        branch
    )
}
