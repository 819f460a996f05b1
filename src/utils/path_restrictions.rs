//! Path checks applied to every path in a change or revert request.
//!
//! A request path must:
//! - be non-empty and relative to the repository root
//! - not climb out of the root through `..`
//! - not point into the backup directory
//! - not resolve, through symlinks, to a location outside the root

use std::fmt;
use std::path::{Component, Path};

/// A violation of path restrictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestrictionViolation {
    /// Path is empty or names only the root itself
    EmptyPath,
    /// Path is absolute or carries a drive prefix
    AbsolutePath { path: String },
    /// Path contains `..` components
    PathTraversal { path: String },
    /// Path resolves into the backup directory
    BackupPath { path: String },
    /// Path resolves through a symlink to a location outside the repository root
    OutsideRoot { path: String },
}

impl fmt::Display for RestrictionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictionViolation::EmptyPath => write!(f, "empty path"),
            RestrictionViolation::AbsolutePath { path } => {
                write!(f, "{}: Absolute paths not allowed", path)
            }
            RestrictionViolation::PathTraversal { path } => {
                write!(f, "{}: Path traversal not allowed", path)
            }
            RestrictionViolation::BackupPath { path } => {
                write!(f, "{}: Cannot modify files inside the backup directory", path)
            }
            RestrictionViolation::OutsideRoot { path } => {
                write!(f, "{}: Path resolves outside the repository root", path)
            }
        }
    }
}

/// Check a single request path against all restrictions.
pub fn check_path(file: &str, backup_dir_name: &str) -> Result<(), RestrictionViolation> {
    let mut first_normal = None;

    for component in Path::new(file).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(RestrictionViolation::AbsolutePath {
                    path: file.to_string(),
                });
            }
            Component::ParentDir => {
                return Err(RestrictionViolation::PathTraversal {
                    path: file.to_string(),
                });
            }
            Component::CurDir => {}
            Component::Normal(name) => {
                if first_normal.is_none() {
                    first_normal = Some(name);
                }
            }
        }
    }

    match first_normal {
        None => Err(RestrictionViolation::EmptyPath),
        Some(name) if name == backup_dir_name => Err(RestrictionViolation::BackupPath {
            path: file.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// Check that `target`, or its closest existing ancestor, resolves inside `root`.
///
/// `root` must already be canonical. Run this before creating directories or
/// writing, so nothing is created through a link that leaves the repository.
/// A dangling symlink at `target` is treated as outside.
pub fn check_within_root(
    file: &str,
    target: &Path,
    root: &Path,
) -> Result<(), RestrictionViolation> {
    let outside = || RestrictionViolation::OutsideRoot {
        path: file.to_string(),
    };

    let existing = target
        .ancestors()
        .find(|ancestor| ancestor.symlink_metadata().is_ok())
        .ok_or_else(outside)?;
    let resolved = existing.canonicalize().map_err(|_| outside())?;

    if resolved.starts_with(root) {
        Ok(())
    } else {
        Err(outside())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BACKUP: &str = ".code_backup";

    #[test]
    fn normal_paths_are_allowed() {
        assert!(check_path("a.txt", BACKUP).is_ok());
        assert!(check_path("src/lib.rs", BACKUP).is_ok());
        assert!(check_path("./src/main.rs", BACKUP).is_ok());
        assert!(check_path("docs/notes..md", BACKUP).is_ok());
    }

    #[test]
    fn path_traversal_is_blocked() {
        assert_eq!(
            check_path("../outside.txt", BACKUP),
            Err(RestrictionViolation::PathTraversal {
                path: "../outside.txt".to_string()
            })
        );
        assert!(check_path("src/../../etc/passwd", BACKUP).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn absolute_paths_are_blocked() {
        assert!(matches!(
            check_path("/etc/passwd", BACKUP),
            Err(RestrictionViolation::AbsolutePath { .. })
        ));
    }

    #[test]
    fn empty_paths_are_blocked() {
        assert_eq!(check_path("", BACKUP), Err(RestrictionViolation::EmptyPath));
        assert_eq!(check_path(".", BACKUP), Err(RestrictionViolation::EmptyPath));
    }

    #[test]
    fn backup_directory_is_blocked() {
        assert!(matches!(
            check_path(".code_backup/a.txt", BACKUP),
            Err(RestrictionViolation::BackupPath { .. })
        ));
        assert!(matches!(
            check_path("./.code_backup/a.txt", BACKUP),
            Err(RestrictionViolation::BackupPath { .. })
        ));
        // Only the top-level backup directory is reserved
        assert!(check_path("nested/.code_backup/a.txt", BACKUP).is_ok());
    }

    #[test]
    fn violation_messages_name_the_path() {
        let violation = check_path("../x", BACKUP).unwrap_err();
        assert_eq!(violation.to_string(), "../x: Path traversal not allowed");
    }

    #[test]
    fn paths_inside_root_resolve_inside() {
        let root = tempdir().unwrap();
        let canonical = root.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.path().join("src")).unwrap();

        let nested = root.path().join("src/new/mod.rs");
        assert!(check_within_root("src/new/mod.rs", &nested, &canonical).is_ok());
        assert!(check_within_root("a.txt", &root.path().join("a.txt"), &canonical).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_out_of_root_is_blocked() {
        let root = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let canonical = root.path().canonicalize().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("link")).unwrap();

        let result = check_within_root(
            "link/deeper/x.txt",
            &root.path().join("link/deeper/x.txt"),
            &canonical,
        );

        assert_eq!(
            result,
            Err(RestrictionViolation::OutsideRoot {
                path: "link/deeper/x.txt".to_string()
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_blocked() {
        let root = tempdir().unwrap();
        let canonical = root.path().canonicalize().unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", root.path().join("dangling"))
            .unwrap();

        let result = check_within_root("dangling", &root.path().join("dangling"), &canonical);

        assert!(matches!(result, Err(RestrictionViolation::OutsideRoot { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_within_root_is_allowed() {
        let root = tempdir().unwrap();
        let canonical = root.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.path().join("real")).unwrap();
        std::os::unix::fs::symlink(root.path().join("real"), root.path().join("alias")).unwrap();

        let aliased = root.path().join("alias/a.txt");
        assert!(check_within_root("alias/a.txt", &aliased, &canonical).is_ok());
    }
}
