//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use autopush::git::SystemGit;

/// Run git in `dir` and return trimmed stdout, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Local settings that keep tests independent of the user's global config.
fn configure(dir: &Path) {
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "push.default", "simple"]);
    git(dir, &["config", "push.autoSetupRemote", "false"]);
    git(dir, &["config", "core.hooksPath", "/dev/null"]);
}

/// A bare repository standing in for the remote.
pub struct BareRemote {
    pub dir: tempfile::TempDir,
}

impl BareRemote {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        git(dir.path(), &["init", "--bare", "--quiet"]);
        git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit id of `branch`, or `None` when the branch does not exist.
    pub fn head_of(&self, branch: &str) -> Option<String> {
        let output = Command::new("git")
            .args(["rev-parse", "--verify", "--quiet", branch])
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn subject_of(&self, branch: &str) -> String {
        git(self.path(), &["log", "-1", "--format=%s", branch])
    }
}

/// A working repository for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a new empty repository on branch `main`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        configure(dir.path());
        Self { dir }
    }

    /// Clone `remote` into a fresh directory.
    pub fn clone_of(remote: &BareRemote) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let source = remote.path().to_str().expect("Non UTF-8 temp path");
        git(dir.path(), &["clone", "--quiet", source, "."]);
        configure(dir.path());
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A runner bound to this repository.
    pub fn runner(&self) -> SystemGit {
        SystemGit::in_dir(self.path())
    }

    pub fn git(&self, args: &[&str]) -> String {
        git(self.path(), args)
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Write `name` and commit it with `message`.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        self.write(name, content);
        self.git(&["add", name]);
        self.git(&["commit", "--quiet", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    pub fn add_remote(&self, remote: &BareRemote) {
        let url = remote.path().to_str().expect("Non UTF-8 temp path");
        self.git(&["remote", "add", "origin", url]);
    }
}

/// Seed `remote` with one commit on `main` and return its id.
pub fn seed_remote(remote: &BareRemote) -> String {
    let seed = TestRepo::new();
    seed.add_remote(remote);
    let id = seed.commit_file("README.md", "# demo\n", "chore: initial commit");
    seed.git(&["push", "--quiet", "origin", "main"]);
    id
}
