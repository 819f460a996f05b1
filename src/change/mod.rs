pub mod apply;
pub mod backup;
mod constants;
mod error;
pub mod result;
pub mod revert;
pub mod summary;

use std::path::{Path, PathBuf};

use crate::config::HandlerConfig;
use crate::utils::path_restrictions::{check_path, check_within_root};

// Re-export public items
pub use backup::{backup_file, latest_backup, list_backups};
pub use constants::{BACKUP_DIR, DEFAULT_CONTEXT_LINES, SUMMARY_RULE_WIDTH, TIMESTAMP_FORMAT};
pub use error::ChangeError;
pub use result::{ApplyResult, ChangeStatus, Progress, ProgressAction, RevertResult};
pub use summary::diff_summary;

/// Applies and reverts file changes under a repository root.
///
/// Every existing file is backed up before it is overwritten, and every
/// change yields a unified diff. Batches never fail as a whole: per-path
/// errors are collected into the returned result.
#[derive(Debug, Clone)]
pub struct ChangeHandler {
    root: PathBuf,
    /// `root` with symlinks resolved, for containment checks
    canonical_root: PathBuf,
    backup_dir: PathBuf,
    config: HandlerConfig,
}

impl ChangeHandler {
    /// Create a handler with the default configuration.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ChangeError> {
        Self::with_config(root, HandlerConfig::default())
    }

    /// Create a handler for `root`.
    ///
    /// The backup directory is not created until the first backup is written.
    pub fn with_config(
        root: impl Into<PathBuf>,
        config: HandlerConfig,
    ) -> Result<Self, ChangeError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ChangeError::InvalidRoot(root));
        }
        let Ok(canonical_root) = root.canonicalize() else {
            return Err(ChangeError::InvalidRoot(root));
        };
        config.validate()?;

        let backup_dir = root.join(&config.backup_dir);
        Ok(ChangeHandler {
            root,
            canonical_root,
            backup_dir,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// All backups of `file`, oldest first. The last one is what a revert restores.
    pub fn backups(&self, file: &str) -> Result<Vec<PathBuf>, ChangeError> {
        check_path(file, &self.config.backup_dir)?;
        list_backups(file, &self.backup_dir)
    }

    /// Resolve a request path to its live location, enforcing path restrictions.
    pub(crate) fn resolve(&self, file: &str) -> Result<PathBuf, ChangeError> {
        check_path(file, &self.config.backup_dir)?;
        let target_path = self.root.join(file);
        check_within_root(file, &target_path, &self.canonical_root)?;
        Ok(target_path)
    }
}
