//! # Repository Handles
//!
//! A [`Repository`] is the in-memory record of one source repository for the
//! duration of a run: its name and URL, where it was cloned to, and the
//! commit subjects scraped from it.
//!
//! Handles move through three states, in order:
//!
//! - **Unsynced**: created from the repository list, nothing on disk yet.
//! - **Synced**: a local clone exists and `local_path` is set.
//! - **Scraped**: `commits` holds the filtered subjects.
//!
//! The repository list itself is plain text with one URL per line. Blank
//! lines are skipped and there is no comment syntax.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Lifecycle state of a [`Repository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Unsynced,
    Synced,
    Scraped,
}

/// One repository taking part in the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    name: String,
    url: String,
    local_path: Option<PathBuf>,
    commits: Vec<String>,
    scraped: bool,
}

impl Repository {
    /// Create a handle for `url`, deriving the name from it.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = name_from_url(&url);
        Self::new(name, url)
    }

    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            local_path: None,
            commits: Vec::new(),
            scraped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Absolute path of the local clone, once synchronized.
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// Scraped commit subjects, newest first.
    pub fn commits(&self) -> &[String] {
        &self.commits
    }

    pub fn state(&self) -> RepoState {
        match (&self.local_path, self.scraped) {
            (None, _) => RepoState::Unsynced,
            (Some(_), false) => RepoState::Synced,
            (Some(_), true) => RepoState::Scraped,
        }
    }

    pub(crate) fn mark_synced(&mut self, path: PathBuf) {
        self.local_path = Some(path);
    }

    /// Drop commits from any previous scrape.
    pub(crate) fn reset_commits(&mut self) {
        self.commits.clear();
        self.scraped = false;
    }

    pub(crate) fn push_commit(&mut self, subject: String) {
        self.commits.push(subject);
    }

    pub(crate) fn mark_scraped(&mut self) {
        self.scraped = true;
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Derive a repository name from its URL.
///
/// The name is the last path segment with a trailing `.git` removed, so
/// both `https://example.com/group/proj.git` and
/// `git@example.com:group/proj` give `proj`.
pub fn name_from_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Parse a repository list.
///
/// When `restrict` is non-empty, repositories whose derived name is not in
/// it are left out entirely.
pub fn parse_repo_list(content: &str, restrict: &[String]) -> Vec<Repository> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Repository::from_url)
        .filter(|repo| restrict.is_empty() || restrict.iter().any(|r| r == repo.name()))
        .collect()
}

/// Read and parse the repository list at `path`.
pub fn read_repo_list(path: &Path, restrict: &[String]) -> Result<Vec<Repository>> {
    let content = fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_repo_list(&content, restrict))
}
