//! # Commit Subject Filtering
//!
//! Commit subjects are kept or dropped by two independent lists of regular
//! expressions:
//!
//! - **include**: a subject must match *every* pattern in this list.
//! - **exclude**: a subject is dropped if it matches *any* pattern here.
//!
//! Both lists may be empty, in which case they impose no constraint. All
//! patterns are compiled case-insensitively and searched anywhere in the
//! subject; they are not anchored to the whole line.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Compiled include and exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PatternSet {
    /// Compile include and exclude patterns.
    ///
    /// Fails with [`Error::Regex`] naming the first pattern that does not
    /// compile.
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: compile_all(include)?,
            exclude: compile_all(exclude)?,
        })
    }

    /// A pattern set that accepts every line.
    pub fn empty() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Returns `true` if `line` passes both lists.
    pub fn matches(&self, line: &str) -> bool {
        matches(line, &self.include, &self.exclude)
    }
}

/// Compile one pattern case-insensitively.
pub fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::Regex {
            pattern: pattern.to_string(),
            source,
        })
}

fn compile_all<I>(patterns: I) -> Result<Vec<Regex>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| compile(p.as_ref()))
        .collect()
}

/// True if `line` matches every pattern in `include` and none in `exclude`.
pub fn matches(line: &str, include: &[Regex], exclude: &[Regex]) -> bool {
    include.iter().all(|re| re.is_match(line)) && !exclude.iter().any(|re| re.is_match(line))
}
