use std::path::{Path, PathBuf};

use crate::change::ChangeError;
use crate::commands::open_handler;

/// List the backups of `file`, oldest first.
pub fn run(root: &Path, file: &str, config: Option<&Path>) -> Result<Vec<PathBuf>, ChangeError> {
    open_handler(root, config)?.backups(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_nothing_before_first_change() {
        let repo = tempdir().unwrap();
        fs::write(repo.path().join("a.txt"), "old\n").unwrap();

        assert!(run(repo.path(), "a.txt", None).unwrap().is_empty());
    }
}
