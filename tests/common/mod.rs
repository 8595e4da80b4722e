//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixtures that build small local git repositories,
//! so the end-to-end tests never need network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     if !git_available() {
//!         return;
//!     }
//!     let fixture = TestFixture::new();
//!     fixture.source_repo("alpha", &["first", "second"]);
//!     fixture.write_repo_list(&["alpha"]);
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::git_available;
    pub use super::TestFixture;
}

/// Returns `true` if a working `git` binary is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run git in `dir` with a fixed identity, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A temporary directory holding source repositories, a repository list,
/// and the clone working directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding the source repositories.
    pub fn sources(&self) -> PathBuf {
        self.path().join("sources")
    }

    /// Path of the source repository `name`, usable as a clone URL.
    pub fn source_url(&self, name: &str) -> String {
        self.sources().join(name).to_string_lossy().into_owned()
    }

    /// Working directory passed to `--workdir`.
    pub fn workdir(&self) -> PathBuf {
        self.path().join("._repos")
    }

    /// Path of the repository list.
    pub fn repo_list(&self) -> PathBuf {
        self.path().join("repos.txt")
    }

    /// Create a source repository with one empty commit per message, oldest
    /// first.
    pub fn source_repo(&self, name: &str, messages: &[&str]) -> PathBuf {
        let dir = self.sources().join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create source repository");
        git(&dir, &["init", "-q"]);
        for message in messages {
            self.commit(name, message);
        }
        dir
    }

    /// Add an empty commit to source repository `name`.
    pub fn commit(&self, name: &str, message: &str) {
        git(
            &self.sources().join(name),
            &["commit", "-q", "--allow-empty", "-m", message],
        );
    }

    /// Tag the current commit of source repository `name`.
    pub fn tag(&self, name: &str, tag: &str) {
        git(&self.sources().join(name), &["tag", tag]);
    }

    /// Write the repository list from source repository names.
    pub fn write_repo_list(&self, names: &[&str]) {
        let lines: Vec<String> = names.iter().map(|n| self.source_url(n)).collect();
        self.write_repo_list_raw(&lines.join("\n\n"));
    }

    /// Write the repository list verbatim.
    pub fn write_repo_list_raw(&self, content: &str) {
        self.temp_dir
            .child("repos.txt")
            .write_str(content)
            .expect("Failed to write repository list");
    }

    /// Create a `chang` command reading this fixture's repository list and
    /// cloning into its working directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chang");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--input")
            .arg(self.repo_list())
            .arg("--workdir")
            .arg(self.workdir());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
