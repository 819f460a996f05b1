use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::utils::path_restrictions::RestrictionViolation;

/// Error type for change operations.
///
/// Batch operations never return this directly. Per-path failures are
/// rendered into the batch result's `errors` list instead.
#[derive(Debug, Error)]
pub enum ChangeError {
    /// Repository root is missing or not a directory
    #[error("repository root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),
    /// Path is outside the repository or inside the backup directory
    #[error("{0}")]
    RestrictedPath(RestrictionViolation),
    /// Backup of an existing file could not be written
    #[error("backup failed for '{file}': {reason}")]
    BackupFailed { file: String, reason: String },
    /// Revert requested for a file that was never backed up
    #[error("no backup found for {0}")]
    NoBackup(String),
    /// Filesystem operation failed
    #[error("{action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Configuration or request file could not be loaded
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl ChangeError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChangeError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<RestrictionViolation> for ChangeError {
    fn from(violation: RestrictionViolation) -> Self {
        ChangeError::RestrictedPath(violation)
    }
}
