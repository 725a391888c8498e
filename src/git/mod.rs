//! Git operations by shelling out to the `git` binary.

pub mod ops;
pub mod push;
pub mod runner;

#[cfg(test)]
pub(crate) mod fake;

pub use ops::{BranchSwitch, current_branch, default_remote, is_repository, switch_branch};
pub use push::{PushFailure, PushOutcome, PushTarget, classify_push_failure, push_with_remediation};
pub use runner::{GitOutput, GitRunner, SystemGit, git_installed};
