//! Subprocess adapter for the system `git` binary.
//!
//! All operations use `std::process::Command` to shell out to `git`,
//! inheriting the user's existing git config, SSH agent, and credential store.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// Normalized result of one `git` invocation.
///
/// Both streams are trimmed. A non-zero exit is `ok: false`; the adapter never
/// returns an error, callers decide what the failure text means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub ok: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// A successful result with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            ok: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given stderr.
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            ok: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs `git` subcommands.
///
/// This abstraction allows scripting git responses in tests.
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` to completion and capture the result.
    fn run(&self, args: &[&str]) -> GitOutput;
}

/// Runner that invokes the real `git` executable.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    workdir: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `dir` instead of the current working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> GitOutput {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                debug!("git {} could not be spawned: {}", args.join(" "), e);
                return GitOutput::failure(format!("Failed to run git: {}", e));
            }
        };

        let result = GitOutput {
            ok: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        debug!(
            "git {} -> ok={} (exit {:?})",
            args.join(" "),
            result.ok,
            output.status.code()
        );

        result
    }
}

/// Check that a `git` executable is on PATH.
pub fn git_installed() -> bool {
    which::which("git").is_ok()
}
