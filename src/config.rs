use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

use crate::change::{BACKUP_DIR, ChangeError, DEFAULT_CONTEXT_LINES};

/// Settings for a [`ChangeHandler`](crate::change::ChangeHandler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Backup directory name, created directly under the repository root
    pub backup_dir: String,
    /// Context lines around each diff hunk
    pub context_lines: usize,
}

impl HandlerConfig {
    pub fn load(path: &Path) -> Result<HandlerConfig, ChangeError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ChangeError::io("failed to read config", path, e))?;
        let config: HandlerConfig =
            serde_json::from_str(&content).map_err(|e| ChangeError::Config {
                reason: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// The backup directory must be a single plain path component.
    pub fn validate(&self) -> Result<(), ChangeError> {
        let mut components = Path::new(&self.backup_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(ChangeError::Config {
                reason: format!(
                    "backup_dir must be a single directory name, got '{}'",
                    self.backup_dir
                ),
            }),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        HandlerConfig {
            backup_dir: BACKUP_DIR.to_string(),
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn default_uses_code_backup() {
        let config = HandlerConfig::default();
        assert_eq!(config.backup_dir, ".code_backup");
        assert_eq!(config.context_lines, 3);
    }

    #[test]
    fn load_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"context_lines": 5}"#).unwrap();

        let config = HandlerConfig::load(&path).unwrap();

        assert_eq!(
            config,
            HandlerConfig {
                backup_dir: ".code_backup".to_string(),
                context_lines: 5,
            }
        );
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let result = HandlerConfig::load(&path);
        assert!(matches!(result, Err(ChangeError::Config { .. })));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = HandlerConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ChangeError::Io { .. })));
    }

    #[test]
    fn validate_rejects_nested_or_escaping_backup_dir() {
        for bad in ["", "..", "a/b", "/tmp/backups", "."] {
            let config = HandlerConfig {
                backup_dir: bad.to_string(),
                ..HandlerConfig::default()
            };
            assert!(config.validate().is_err(), "accepted '{}'", bad);
        }
        let ok = HandlerConfig {
            backup_dir: ".backups".to_string(),
            ..HandlerConfig::default()
        };
        assert!(ok.validate().is_ok());
    }
}
