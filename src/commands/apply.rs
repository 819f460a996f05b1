use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::change::{ApplyResult, ChangeError};
use crate::commands::{open_handler, report_progress};

/// Read a change request: a JSON object mapping relative paths to new content.
///
/// Entries keep the order they have in the file.
pub fn load_changes(path: &Path) -> Result<IndexMap<String, String>, ChangeError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ChangeError::io("failed to read change request", path, e))?;
    serde_json::from_str(&content).map_err(|e| ChangeError::Config {
        reason: format!("invalid change request {}: {}", path.display(), e),
    })
}

/// Apply the change request at `changes_path` to the repository at `root`.
pub fn run(
    root: &Path,
    changes_path: &Path,
    config: Option<&Path>,
) -> Result<ApplyResult, ChangeError> {
    let handler = open_handler(root, config)?;
    let changes = load_changes(changes_path)?;
    Ok(handler.apply_changes_with_progress(&changes, Some(report_progress)))
}
