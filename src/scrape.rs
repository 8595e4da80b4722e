//! # Commit Scraping
//!
//! Pulls the one-line history of a synchronized repository, strips the
//! leading abbreviated hash from every line, and keeps the subjects that
//! pass the [`PatternSet`].

use log::debug;

use crate::config::RevRange;
use crate::error::{Error, Result};
use crate::filter::PatternSet;
use crate::git::HistoryProvider;
use crate::repository::Repository;

/// Replace `repo`'s commits with the filtered subjects in `range`.
///
/// The commit list is cleared first, so scraping the same repository twice
/// gives the same result. Fails with [`Error::NotSynchronized`] if the
/// repository has no local clone yet.
pub fn scrape(
    repo: &mut Repository,
    range: Option<&RevRange>,
    patterns: &PatternSet,
    provider: &dyn HistoryProvider,
) -> Result<()> {
    repo.reset_commits();

    let path = repo
        .local_path()
        .ok_or_else(|| Error::NotSynchronized {
            name: repo.name().to_string(),
        })?
        .to_path_buf();

    match range {
        Some(range) => debug!(
            "extracting commits from {} in {}",
            repo.name(),
            range.to_git_arg()
        ),
        None => debug!("extracting commits from {}", repo.name()),
    }

    let lines = provider.log(&path, range)?;
    for text in lines.iter().filter_map(|line| subject(line)) {
        if patterns.matches(&text) {
            repo.push_commit(text);
        }
    }

    repo.mark_scraped();
    Ok(())
}

/// Subject of a `git log --oneline` line, without the leading hash.
///
/// Whitespace runs inside the subject collapse to single spaces. Returns
/// `None` when nothing follows the hash.
pub fn subject(line: &str) -> Option<String> {
    let subject = line.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    if subject.is_empty() {
        None
    } else {
        Some(subject)
    }
}
