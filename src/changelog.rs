//! # Changelog Rendering
//!
//! Renders scraped commits as one line per commit:
//!
//! ```text
//! [repository-name] commit subject
//! ```
//!
//! grouped by repository in the order the repositories were listed, and
//! within a repository in history order. Written to a file, the changelog
//! is preceded by a header and a blank line:
//!
//! ```text
//! ~~ Changelog generated Oct 16 2026 [v1.0, v2.0] ~~
//! ```
//!
//! Terminal output has no header and may color the repository name. This
//! module does no filtering.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::config::RevRange;
use crate::error::Result;
use crate::output::{repo_label, OutputConfig};
use crate::repository::Repository;

/// Date format used in the file header, e.g. `Oct 16 2026`.
pub const HEADER_DATE_FORMAT: &str = "%b %d %Y";

/// The header line written at the top of a changelog file.
pub fn header_line(date: &str, range: Option<&RevRange>) -> String {
    match range {
        Some(range) => format!("~~ Changelog generated {} {} ~~", date, range),
        None => format!("~~ Changelog generated {} ~~", date),
    }
}

/// Write the changelog lines for `repos` to `out`.
///
/// When `header` is given it is written first, followed by a blank line.
pub fn write_changelog<W: Write>(
    out: &mut W,
    repos: &[Repository],
    header: Option<&str>,
    style: &OutputConfig,
) -> io::Result<()> {
    if let Some(header) = header {
        writeln!(out, "{}", header)?;
        writeln!(out)?;
    }

    for repo in repos {
        let label = repo_label(style, repo.name());
        for commit in repo.commits() {
            writeln!(out, "[{}] {}", label, commit)?;
        }
    }

    out.flush()
}

/// Emit the changelog to `destination`, or to stdout when `None`.
///
/// A destination file is created or truncated, gets a dated header, and is
/// never colored.
pub fn emit(
    repos: &[Repository],
    destination: Option<&Path>,
    range: Option<&RevRange>,
    style: &OutputConfig,
) -> Result<()> {
    match destination {
        Some(path) => {
            let date = Local::now().format(HEADER_DATE_FORMAT).to_string();
            let header = header_line(&date, range);
            let mut file = BufWriter::new(File::create(path)?);
            write_changelog(
                &mut file,
                repos,
                Some(header.as_str()),
                &OutputConfig::without_color(),
            )?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_changelog(&mut lock, repos, None, style)?;
        }
    }
    Ok(())
}
