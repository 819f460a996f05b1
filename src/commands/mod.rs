pub mod apply;
pub mod backups;
pub mod revert;

use std::path::Path;

use crate::change::{ChangeError, ChangeHandler, Progress};
use crate::config::HandlerConfig;

/// Build a handler for `root`, loading settings from `config` when given.
pub fn open_handler(root: &Path, config: Option<&Path>) -> Result<ChangeHandler, ChangeError> {
    let config = match config {
        Some(path) => HandlerConfig::load(path)?,
        None => HandlerConfig::default(),
    };
    ChangeHandler::with_config(root, config)
}

/// Print a progress line to stderr, keeping stdout for results.
pub fn report_progress(p: Progress<'_>) {
    eprintln!("{} [{}/{}]: {}", p.action.label(), p.index + 1, p.total, p.file);
}
