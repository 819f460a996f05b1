use std::path::Path;

use crate::change::{ChangeError, RevertResult};
use crate::commands::{open_handler, report_progress};

/// Restore `files` in the repository at `root` from their latest backups.
pub fn run(
    root: &Path,
    files: &[String],
    config: Option<&Path>,
) -> Result<RevertResult, ChangeError> {
    let handler = open_handler(root, config)?;
    Ok(handler.revert_changes_with_progress(files, Some(report_progress)))
}
