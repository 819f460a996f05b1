/// Default directory name for backups under the repository root
pub const BACKUP_DIR: &str = ".code_backup";
/// Timestamp suffix format for backups that would collide with an existing one
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Default number of context lines around each diff hunk
pub const DEFAULT_CONTEXT_LINES: usize = 3;
/// Width of the rule printed under each file in a diff summary
pub const SUMMARY_RULE_WIDTH: usize = 40;
