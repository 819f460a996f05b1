use std::fs;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::change::backup::backup_file;
use crate::change::{
    ApplyResult, ChangeError, ChangeHandler, ChangeStatus, Progress, ProgressAction,
};
use crate::utils::diff::create_diff;

impl ChangeHandler {
    /// Apply a change request, mapping relative paths to their new full content.
    pub fn apply_changes(&self, changes: &IndexMap<String, String>) -> ApplyResult {
        self.apply_changes_with_progress(changes, None::<fn(Progress<'_>)>)
    }

    /// Apply a change request, reporting each path to `on_progress` before it is touched.
    ///
    /// Paths are handled in map order. For each one:
    /// - existing file: read, back up, diff against the new content, overwrite
    /// - missing file: diff against empty text, create (with parent directories)
    ///
    /// A failing path is recorded in `errors` and the batch moves on.
    pub fn apply_changes_with_progress<F>(
        &self,
        changes: &IndexMap<String, String>,
        mut on_progress: Option<F>,
    ) -> ApplyResult
    where
        F: FnMut(Progress<'_>),
    {
        let total = changes.len();
        let mut modified_files = Vec::new();
        let mut errors = Vec::new();
        let mut patches = IndexMap::new();

        for (index, (file, new_content)) in changes.iter().enumerate() {
            if let Some(ref mut callback) = on_progress {
                let action = if self.root.join(file).exists() {
                    ProgressAction::Modifying
                } else {
                    ProgressAction::Creating
                };
                callback(Progress {
                    file,
                    index,
                    total,
                    action,
                });
            }

            match self.apply_entry(file, new_content) {
                Ok(patch) => {
                    debug!(file = %file, "applied change");
                    modified_files.push(file.clone());
                    patches.insert(file.clone(), patch);
                }
                Err(e) => {
                    let message = format!("Error modifying {}: {}", file, e);
                    warn!("{}", message);
                    errors.push(message);
                }
            }
        }

        ApplyResult {
            status: ChangeStatus::from_counts(modified_files.len(), errors.len()),
            modified_files,
            errors,
            patches,
        }
    }

    /// Apply one change and return its patch.
    fn apply_entry(&self, file: &str, new_content: &str) -> Result<String, ChangeError> {
        let target_path = self.resolve(file)?;

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ChangeError::io("failed to create parent directory", parent, e))?;
        }

        // Nothing to preserve for a new file
        let original = if target_path.exists() {
            let original = fs::read_to_string(&target_path)
                .map_err(|e| ChangeError::io("failed to read original file", &target_path, e))?;
            backup_file(&target_path, file, &self.backup_dir)?;
            original
        } else {
            String::new()
        };

        let patch = create_diff(&original, new_content, file, self.config.context_lines);

        fs::write(&target_path, new_content)
            .map_err(|e| ChangeError::io("failed to write file", &target_path, e))?;

        Ok(patch)
    }
}
