//! Typed helpers over the git subprocess adapter.

use super::runner::{GitOutput, GitRunner};

/// Result of switching to a named branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSwitch {
    /// Already on the requested branch; nothing was run.
    AlreadyOn,
    /// Checked out an existing branch.
    Switched,
    /// Created the branch from the current HEAD.
    Created,
    /// Both checkout and create failed; the previous branch is kept.
    Failed(String),
}

/// Whether the runner's working directory is inside a git work tree.
pub fn is_repository(git: &dyn GitRunner) -> bool {
    let out = git.run(&["rev-parse", "--is-inside-work-tree"]);
    out.ok && out.stdout == "true"
}

/// The current branch name, or `None` on a detached HEAD.
pub fn current_branch(git: &dyn GitRunner) -> Option<String> {
    let out = git.run(&["branch", "--show-current"]);
    if out.ok && !out.stdout.is_empty() {
        Some(out.stdout)
    } else {
        None
    }
}

/// The remote to push to: `origin` when present, otherwise the first listed.
pub fn default_remote(git: &dyn GitRunner) -> Option<String> {
    let out = git.run(&["remote"]);
    if !out.ok {
        return None;
    }

    let remotes: Vec<&str> = out.stdout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if remotes.contains(&"origin") {
        Some("origin".to_string())
    } else {
        remotes.first().map(|r| r.to_string())
    }
}

/// The fetch URL of a remote.
pub fn remote_url(git: &dyn GitRunner, remote: &str) -> Option<String> {
    let out = git.run(&["remote", "get-url", remote]);
    (out.ok && !out.stdout.is_empty()).then_some(out.stdout)
}

/// Porcelain status of the working tree; empty stdout means clean.
pub fn status(git: &dyn GitRunner) -> GitOutput {
    git.run(&["status", "--porcelain"])
}

/// Stage the given paths, or everything when the selection is empty or `.`.
pub fn stage(git: &dyn GitRunner, files: &[String]) -> GitOutput {
    if files.is_empty() || (files.len() == 1 && files[0] == ".") {
        return git.run(&["add", "-A"]);
    }

    let mut args = vec!["add", "--"];
    args.extend(files.iter().map(String::as_str));
    git.run(&args)
}

/// Unified diff of what is staged.
pub fn staged_diff(git: &dyn GitRunner) -> String {
    let out = git.run(&["diff", "--cached"]);
    if out.ok { out.stdout } else { String::new() }
}

/// `--stat` summary of what is staged.
pub fn staged_stat(git: &dyn GitRunner) -> String {
    let out = git.run(&["diff", "--cached", "--stat"]);
    if out.ok { out.stdout } else { String::new() }
}

/// Create a commit from the index.
pub fn commit(git: &dyn GitRunner, message: &str) -> GitOutput {
    git.run(&["commit", "-m", message])
}

/// Check out `name`, creating it when it does not exist yet.
pub fn switch_branch(git: &dyn GitRunner, name: &str) -> BranchSwitch {
    if current_branch(git).as_deref() == Some(name) {
        return BranchSwitch::AlreadyOn;
    }

    // The trailing `--` keeps git from reading `name` as a path to restore.
    if git.run(&["checkout", name, "--"]).ok {
        return BranchSwitch::Switched;
    }

    let created = git.run(&["checkout", "-b", name]);
    if created.ok {
        BranchSwitch::Created
    } else {
        BranchSwitch::Failed(created.stderr)
    }
}

/// Split the user's file selection into paths.
///
/// An empty answer or `.` selects everything.
pub fn parse_file_selection(answer: &str) -> Vec<String> {
    let files: Vec<String> = answer
        .split_whitespace()
        .map(|s| s.trim_matches(',').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if files.iter().any(|f| f == ".") {
        vec![".".to_string()]
    } else {
        files
    }
}
