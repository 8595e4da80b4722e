//! # Run Configuration
//!
//! Everything the pipeline needs to know about one run lives in
//! [`RunConfig`], built once from the command line and passed explicitly to
//! each stage. Nothing is kept in process-wide state: the working
//! directory, the `git` timeout, and the verbosity are all plain fields.
//!
//! The commit range is modelled by [`RevRange`]. A range is either fully
//! specified (both a start and an end reference) or absent; a one-sided
//! range is rejected by [`RevRange::from_bounds`] before any repository is
//! touched.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::defaults;
use crate::error::{Error, Result};
use crate::filter::PatternSet;

/// A `start..end` commit range, where both ends are tags or commit ids.
///
/// Follows git's range convention: commits reachable from `end` but not
/// from `start`. The `start` commit itself is therefore not part of the
/// range while the `end` commit is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevRange {
    pub start: String,
    pub end: String,
}

impl RevRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Validate an optional pair of bounds.
    ///
    /// Empty strings are treated as absent. Returns `Ok(None)` when neither
    /// bound is given and [`Error::InvalidRange`] when only one is.
    pub fn from_bounds(start: Option<String>, end: Option<String>) -> Result<Option<Self>> {
        let start = start.filter(|s| !s.is_empty());
        let end = end.filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(Self { start, end })),
            (None, None) => Ok(None),
            (start, end) => Err(Error::InvalidRange { start, end }),
        }
    }

    /// The revision argument passed to `git log`.
    pub fn to_git_arg(&self) -> String {
        format!("{}..{}", self.start, self.end)
    }
}

impl fmt::Display for RevRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// File listing repository URLs, one per line.
    pub input: PathBuf,
    /// Where the changelog is written; `None` means stdout.
    pub output: Option<PathBuf>,
    /// Directory holding one clone per repository.
    pub workdir: PathBuf,
    pub range: Option<RevRange>,
    pub patterns: PatternSet,
    /// Only these repository names are processed when non-empty.
    pub restrict: Vec<String>,
    /// Remove and recreate `workdir` before processing.
    pub clean: bool,
    /// Suppress progress diagnostics.
    pub quiet: bool,
    /// Upper bound on each `git` invocation.
    pub git_timeout: Duration,
}

impl RunConfig {
    /// A configuration reading `input` with every other setting at its
    /// default.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            workdir: defaults::default_workdir(),
            range: None,
            patterns: PatternSet::empty(),
            restrict: Vec::new(),
            clean: false,
            quiet: false,
            git_timeout: defaults::default_git_timeout(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_range(mut self, range: Option<RevRange>) -> Self {
        self.range = range;
        self
    }

    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_restrict(mut self, restrict: Vec<String>) -> Self {
        self.restrict = restrict;
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }
}
