//! # Error Handling
//!
//! This module defines the centralized error type for `chang`. It uses the
//! `thiserror` library to build an `Error` enum covering every failure the
//! pipeline can hit, from configuration mistakes caught before any I/O to
//! `git` invocations that fail or time out.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Configuration errors (`InvalidRange`,
//!   `Regex`, `InputFile`) are detected before any repository is touched.
//!   Runtime errors (`GitCommand`, `Workdir`, `Io`) carry enough context to
//!   tell the user which command failed and what it printed.
//!
//! - **`GitFailure`**: Why a `git` invocation did not succeed.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Each variant maps to a process exit status through [`Error::exit_code`],
//! using the constants in [`crate::exit_codes`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::exit_codes;

/// Main error type for chang operations
#[derive(Error, Debug)]
pub enum Error {
    /// Only one side of the commit range was supplied.
    #[error(
        "Invalid range: must pass either both or neither of start and end tags (start: {}, end: {})",
        start.as_deref().unwrap_or("<none>"),
        end.as_deref().unwrap_or("<none>")
    )]
    InvalidRange {
        start: Option<String>,
        end: Option<String>,
    },

    /// An include or exclude pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The repository list could not be read.
    #[error("Cannot read repository list {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `git` invocation failed, exited non-zero, or timed out.
    ///
    /// `output` holds the combined stdout and stderr captured from the
    /// failed process.
    #[error("Command \"{command}\" {reason}")]
    GitCommand {
        command: String,
        output: String,
        reason: GitFailure,
    },

    /// A repository was scraped before it was synchronized.
    #[error("Repository {name} has not been synchronized")]
    NotSynchronized { name: String },

    /// The working directory could not be reset.
    #[error("Cannot reset working directory {}: {source}", path.display())]
    Workdir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a `git` invocation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitFailure {
    /// The process could not be started.
    Spawn(String),
    /// The process exited unsuccessfully. `None` when killed by a signal.
    ExitCode(Option<i32>),
    /// The process outlived its deadline and was killed.
    Timeout(Duration),
}

impl fmt::Display for GitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitFailure::Spawn(msg) => write!(f, "could not be started: {}", msg),
            GitFailure::ExitCode(Some(code)) => write!(f, "failed with error code {}", code),
            GitFailure::ExitCode(None) => write!(f, "was terminated by a signal"),
            GitFailure::Timeout(limit) => {
                write!(f, "timed out after {} seconds", limit.as_secs())
            }
        }
    }
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidRange { .. } => exit_codes::USAGE,
            Error::GitCommand { .. } => exit_codes::SYNC_FAILED,
            Error::Regex { .. }
            | Error::InputFile { .. }
            | Error::NotSynchronized { .. }
            | Error::Workdir { .. }
            | Error::Io(_) => exit_codes::ERROR,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
