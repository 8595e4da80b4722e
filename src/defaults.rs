//! Default values for chang configuration.
//!
//! This module provides centralized default values used by the CLI and the
//! pipeline, ensuring consistency and avoiding duplication.

use std::path::PathBuf;
use std::time::Duration;

/// Directory, relative to the current directory, holding one clone per
/// repository. Overridden by `--workdir` or `CHANG_WORKDIR`.
pub const DEFAULT_WORKDIR: &str = "._repos";

/// Upper bound on a single `git` invocation, in seconds.
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 100;

/// Returns the default working directory.
pub fn default_workdir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKDIR)
}

/// Returns the default `git` invocation timeout.
pub fn default_git_timeout() -> Duration {
    Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workdir_is_relative() {
        let workdir = default_workdir();
        assert!(workdir.is_relative());
        assert!(workdir.ends_with("._repos"));
    }

    #[test]
    fn test_default_git_timeout() {
        assert_eq!(default_git_timeout(), Duration::from_secs(100));
    }
}
