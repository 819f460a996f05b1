use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Overall outcome of a batch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Success,
    PartialSuccess,
    Error,
}

impl ChangeStatus {
    /// Derive the status from per-path outcome counts.
    ///
    /// An empty batch counts as a success.
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (_, 0) => ChangeStatus::Success,
            (0, _) => ChangeStatus::Error,
            _ => ChangeStatus::PartialSuccess,
        }
    }

    pub fn is_success(self) -> bool {
        self == ChangeStatus::Success
    }
}

/// Result of applying a change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub status: ChangeStatus,
    pub modified_files: Vec<String>,
    pub errors: Vec<String>,
    /// Unified diff per modified path, in request order
    pub patches: IndexMap<String, String>,
}

/// Result of reverting a set of paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertResult {
    pub status: ChangeStatus,
    pub reverted_files: Vec<String>,
    pub errors: Vec<String>,
}

/// What is about to happen to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressAction {
    Creating,
    Modifying,
    Restoring,
}

impl ProgressAction {
    pub fn label(self) -> &'static str {
        match self {
            ProgressAction::Creating => "Creating",
            ProgressAction::Modifying => "Modifying",
            ProgressAction::Restoring => "Restoring",
        }
    }
}

/// Progress report passed to batch callbacks before each path is handled.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub file: &'a str,
    pub index: usize,
    pub total: usize,
    pub action: ProgressAction,
}
