//! # Repository Synchronization
//!
//! Makes sure a current local clone of a repository exists under the
//! working directory, at `<workdir>/<name>`:
//!
//! - a directory already there is treated as an existing clone and fetched;
//! - anything else at that path (a stray file, a symlink to a file) is
//!   removed first;
//! - a missing path is created and the repository is cloned into it.
//!
//! A failed clone or fetch is not rolled back. A half-written clone is left
//! in place and the next run's fetch against it fails loudly.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::git::HistoryProvider;
use crate::repository::Repository;

/// What [`ensure_local`] did to bring a repository up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Clone,
    Fetch,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncAction::Clone => f.write_str("cloned"),
            SyncAction::Fetch => f.write_str("fetched"),
        }
    }
}

/// Clone or fetch `repo` under `workdir` and record the clone's absolute path
/// on the handle.
pub fn ensure_local(
    repo: &mut Repository,
    workdir: &Path,
    provider: &dyn HistoryProvider,
) -> Result<SyncAction> {
    let target = std::path::absolute(target_path(repo, workdir))?;

    if target.exists() && !target.is_dir() {
        fs::remove_file(&target)?;
    }

    let action = if target.is_dir() {
        debug!("fetching {} in {}", repo.name(), target.display());
        provider.fetch(&target)?;
        SyncAction::Fetch
    } else {
        debug!("cloning {} into {}", repo.url(), target.display());
        fs::create_dir_all(&target)?;
        provider.clone_repo(repo.url(), &target)?;
        SyncAction::Clone
    };

    repo.mark_synced(target);
    Ok(action)
}

/// Where [`ensure_local`] will place `repo` under `workdir`.
pub fn target_path(repo: &Repository, workdir: &Path) -> PathBuf {
    workdir.join(repo.name())
}
