use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::change::backup::latest_backup;
use crate::change::{
    ChangeError, ChangeHandler, ChangeStatus, Progress, ProgressAction, RevertResult,
};

impl ChangeHandler {
    /// Restore each path from its most recent backup.
    pub fn revert_changes<S: AsRef<str>>(&self, files: &[S]) -> RevertResult {
        self.revert_changes_with_progress(files, None::<fn(Progress<'_>)>)
    }

    /// Restore each path from its most recent backup, reporting progress.
    ///
    /// Backups are left in place. A path with no backup is recorded as an
    /// error and its live file is not touched.
    pub fn revert_changes_with_progress<S, F>(
        &self,
        files: &[S],
        mut on_progress: Option<F>,
    ) -> RevertResult
    where
        S: AsRef<str>,
        F: FnMut(Progress<'_>),
    {
        let total = files.len();
        let mut reverted_files = Vec::new();
        let mut errors = Vec::new();

        for (index, file) in files.iter().enumerate() {
            let file = file.as_ref();
            if let Some(ref mut callback) = on_progress {
                callback(Progress {
                    file,
                    index,
                    total,
                    action: ProgressAction::Restoring,
                });
            }

            match self.revert_entry(file) {
                Ok(backup_path) => {
                    debug!(file, backup = %backup_path.display(), "reverted file");
                    reverted_files.push(file.to_string());
                }
                Err(e) => {
                    let message = format!("Error reverting {}: {}", file, e);
                    warn!("{}", message);
                    errors.push(message);
                }
            }
        }

        RevertResult {
            status: ChangeStatus::from_counts(reverted_files.len(), errors.len()),
            reverted_files,
            errors,
        }
    }

    /// Restore one file and return the backup it was restored from.
    fn revert_entry(&self, file: &str) -> Result<PathBuf, ChangeError> {
        let target_path = self.resolve(file)?;

        let backup_path = latest_backup(file, &self.backup_dir)?
            .ok_or_else(|| ChangeError::NoBackup(file.to_string()))?;

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ChangeError::io("failed to create parent directory", parent, e))?;
        }

        fs::copy(&backup_path, &target_path)
            .map_err(|e| ChangeError::io("failed to restore file", &target_path, e))?;

        Ok(backup_path)
    }
}
