//! Pipeline driver for a complete changelog run
//!
//! This module coordinates the stages of one run, strictly in sequence:
//! 1. Read the repository list (honouring the name restriction)
//! 2. Reset the working directory when a clean run was requested
//! 3. For each repository in list order: synchronize, then scrape
//! 4. Emit the changelog once over all repositories
//!
//! A synchronization failure aborts the run before anything is emitted.
//! A scrape failure is logged and recorded in the [`RunReport`]; the run
//! moves on to the next repository and the changelog is still written for
//! the repositories that succeeded.

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::changelog;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::exit_codes;
use crate::git::HistoryProvider;
use crate::output::OutputConfig;
use crate::repository::{read_repo_list, Repository};
use crate::scrape::scrape;
use crate::sync::ensure_local;

/// A repository whose history could not be read.
#[derive(Debug)]
pub struct ScrapeFailure {
    pub name: String,
    pub error: Error,
}

/// Outcome of a run that was not aborted.
#[derive(Debug)]
pub struct RunReport {
    /// Every processed repository, in list order.
    pub repositories: Vec<Repository>,
    pub scrape_failures: Vec<ScrapeFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.scrape_failures.is_empty()
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::SCRAPE_FAILED
        }
    }
}

/// Execute a complete run and emit the changelog.
pub fn run(
    config: &RunConfig,
    provider: &dyn HistoryProvider,
    style: &OutputConfig,
) -> Result<RunReport> {
    let report = collect(config, provider)?;
    changelog::emit(
        &report.repositories,
        config.output.as_deref(),
        config.range.as_ref(),
        style,
    )?;
    Ok(report)
}

/// Run every stage except emitting the changelog.
pub fn collect(config: &RunConfig, provider: &dyn HistoryProvider) -> Result<RunReport> {
    let mut repositories = read_repo_list(&config.input, &config.restrict)?;

    if config.clean {
        reset_workdir(&config.workdir)?;
    }

    let mut scrape_failures = Vec::new();
    for repo in &mut repositories {
        if !config.quiet {
            info!("=> Getting latest {} from {}", repo.name(), repo.url());
        }
        let action = ensure_local(repo, &config.workdir, provider)?;

        if !config.quiet {
            if let Some(path) = repo.local_path() {
                info!("::=> {} {} into {}", action, repo.name(), path.display());
            }
            match &config.range {
                Some(range) => info!(
                    "::=> extracting commit set from {} in {}",
                    repo.name(),
                    range.to_git_arg()
                ),
                None => info!("::=> extracting commit set from {}", repo.name()),
            }
        }
        if let Err(error) = scrape(repo, config.range.as_ref(), &config.patterns, provider) {
            match &error {
                Error::GitCommand { output, .. } if !output.is_empty() => {
                    warn!("skipping {}: {}\n{}", repo.name(), error, output)
                }
                _ => warn!("skipping {}: {}", repo.name(), error),
            }
            scrape_failures.push(ScrapeFailure {
                name: repo.name().to_string(),
                error,
            });
        }
    }

    Ok(RunReport {
        repositories,
        scrape_failures,
    })
}

/// Remove `workdir` with everything in it and recreate it empty.
///
/// A missing directory is not an error.
pub fn reset_workdir(workdir: &Path) -> Result<()> {
    let workdir_error = |source: io::Error| Error::Workdir {
        path: workdir.to_path_buf(),
        source,
    };

    match fs::remove_dir_all(workdir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(workdir_error(e)),
    }
    fs::create_dir_all(workdir).map_err(workdir_error)
}
