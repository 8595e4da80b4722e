//! # Chang Library
//!
//! This library aggregates one-line commit messages from a list of git
//! repositories into a single changelog. It is designed to be used by the
//! `chang` command-line tool but can also be driven directly, for example
//! with a custom [`git::HistoryProvider`].
//!
//! ## Quick Example
//!
//! ```
//! use chang::filter::PatternSet;
//! use chang::repository::parse_repo_list;
//!
//! let repos = parse_repo_list(
//!     "https://example.com/group/proj.git\n\nhttps://example.com/tools\n",
//!     &[],
//! );
//! assert_eq!(repos.len(), 2);
//! assert_eq!(repos[0].name(), "proj");
//!
//! let patterns = PatternSet::new(["fix"], ["wip"]).unwrap();
//! assert!(patterns.matches("FIX: crash on start"));
//! assert!(!patterns.matches("fix: wip"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Repositories (`repository`)**: One handle per listed URL, carrying
//!   its name, local clone path, and scraped commits.
//! - **Git (`git`)**: The `HistoryProvider` trait and its `git` CLI
//!   implementation, with a timeout on every invocation.
//! - **Synchronization (`sync`)**: Clone-or-fetch into the working directory.
//! - **Scraping (`scrape`)**: One-line history, optionally within a
//!   `start..end` range, filtered by include/exclude patterns (`filter`).
//! - **Changelog (`changelog`)**: Renders the result to stdout or a file.
//!
//! ## Execution Flow
//!
//! [`pipeline::run`] executes the following steps, one repository at a time:
//!
//! 1.  **Read**: Parse the repository list, applying any name restriction.
//! 2.  **Clean**: Optionally reset the working directory.
//! 3.  **Synchronize**: Clone or fetch each repository. A failure aborts the run.
//! 4.  **Scrape**: Collect matching commit subjects. A failure is recorded
//!     and the run continues.
//! 5.  **Emit**: Write the changelog.

pub mod changelog;
pub mod config;
pub mod defaults;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod repository;
pub mod scrape;
pub mod sync;

#[cfg(test)]
mod filter_proptest;
