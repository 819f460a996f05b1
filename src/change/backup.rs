//! Backup creation and lookup.
//!
//! A file's first backup lives at `<backup_dir>/<relative path>`. Later
//! backups of the same file get a `.<YYYYMMDD_HHMMSS>` suffix, plus a `.<n>`
//! counter whenever the clock has not moved past the latest stamp, so no
//! backup is ever overwritten and the newest write always sorts last.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::change::{ChangeError, TIMESTAMP_FORMAT};

/// Copy `target_path` into the backup directory, mirroring `file`.
///
/// Returns the path of the backup that was written.
pub fn backup_file(
    target_path: &Path,
    file: &str,
    backup_dir: &Path,
) -> Result<PathBuf, ChangeError> {
    backup_file_at(target_path, file, backup_dir, Local::now())
}

pub(crate) fn backup_file_at(
    target_path: &Path,
    file: &str,
    backup_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, ChangeError> {
    let backup_failed = |reason: String| ChangeError::BackupFailed {
        file: file.to_string(),
        reason,
    };

    let base_path = backup_dir.join(file);
    let (Some(parent), Some(base_name)) = (
        base_path.parent(),
        base_path.file_name().and_then(|name| name.to_str()),
    ) else {
        return Err(backup_failed("path has no file name".to_string()));
    };

    fs::create_dir_all(parent)
        .map_err(|e| backup_failed(format!("failed to create backup directory: {}", e)))?;

    let names = file_names(parent).map_err(|e| backup_failed(e.to_string()))?;
    check_unambiguous(base_name, &names).map_err(backup_failed)?;

    let backup_path = if names.iter().any(|name| name == base_name) {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        parent.join(next_stamped_name(base_name, &names, &stamp))
    } else {
        parent.join(base_name)
    };

    fs::copy(target_path, &backup_path).map_err(|e| {
        backup_failed(format!("failed to copy to {}: {}", backup_path.display(), e))
    })?;

    debug!(file, backup = %backup_path.display(), "backed up file");
    Ok(backup_path)
}

/// Name for a new stamped backup that sorts after every existing one.
///
/// If the clock reads earlier than the latest stamp (DST fall-back, clock
/// correction, same second), the latest stamp is reused with the next counter.
fn next_stamped_name(base_name: &str, names: &[String], stamp: &str) -> String {
    let latest = names
        .iter()
        .filter_map(|name| parse_backup_name(name, base_name).flatten())
        .max();
    match latest {
        Some((latest_stamp, counter)) if latest_stamp.as_str() >= stamp => {
            format!("{}.{}.{}", base_name, latest_stamp, counter + 1)
        }
        _ => format!("{}.{}", base_name, stamp),
    }
}

/// Refuse a backup whose name would mix with another file's backups.
///
/// `a.txt.<stamp>` cannot be backed up next to a base backup of `a.txt`, and
/// `a.txt` cannot get a first backup next to an existing `a.txt.<stamp>`.
fn check_unambiguous(base_name: &str, names: &[String]) -> Result<(), String> {
    if let Some(owner) = stamp_owners(base_name)
        .into_iter()
        .find(|owner| names.iter().any(|name| name == owner))
    {
        return Err(format!("backup name collides with backups of '{}'", owner));
    }

    if !names.iter().any(|name| name == base_name) {
        if let Some(other) = names
            .iter()
            .find(|name| matches!(parse_backup_name(name, base_name), Some(Some(_))))
        {
            return Err(format!("backup name collides with existing backup '{}'", other));
        }
    }

    Ok(())
}

/// Every name that would list `name` as one of its stamped backups.
fn stamp_owners(name: &str) -> Vec<&str> {
    name.match_indices('.')
        .map(|(index, _)| &name[..index])
        .filter(|owner| matches!(parse_backup_name(name, owner), Some(Some(_))))
        .collect()
}

/// Ordering key of a backup file name: `None` for the base backup,
/// `Some((stamp, counter))` for a suffixed one.
type BackupKey = Option<(String, u32)>;

fn parse_backup_name(name: &str, base_name: &str) -> Option<BackupKey> {
    if name == base_name {
        return Some(None);
    }
    let suffix = name.strip_prefix(base_name)?.strip_prefix('.')?;
    let (stamp, counter) = match suffix.split_once('.') {
        Some((stamp, counter)) => (stamp, counter.parse::<u32>().ok()?),
        None => (suffix, 0),
    };
    if !is_timestamp(stamp) {
        return None;
    }
    Some(Some((stamp.to_string(), counter)))
}

/// Matches the `YYYYMMDD_HHMMSS` shape produced by `TIMESTAMP_FORMAT`.
fn is_timestamp(stamp: &str) -> bool {
    stamp.len() == 15
        && stamp.char_indices().all(|(i, c)| match i {
            8 => c == '_',
            _ => c.is_ascii_digit(),
        })
}

/// Names of the regular files directly inside `dir`.
fn file_names(dir: &Path) -> Result<Vec<String>, ChangeError> {
    let entries =
        fs::read_dir(dir).map_err(|e| ChangeError::io("failed to read backup directory", dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ChangeError::io("failed to read backup directory", dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

/// List every backup of `file`, oldest first.
pub fn list_backups(file: &str, backup_dir: &Path) -> Result<Vec<PathBuf>, ChangeError> {
    let base_path = backup_dir.join(file);
    let (Some(parent), Some(base_name)) = (
        base_path.parent(),
        base_path.file_name().and_then(|name| name.to_str()),
    ) else {
        return Ok(Vec::new());
    };
    if !parent.is_dir() {
        return Ok(Vec::new());
    }

    let mut found: Vec<(BackupKey, String)> = file_names(parent)?
        .into_iter()
        .filter_map(|name| parse_backup_name(&name, base_name).map(|key| (key, name)))
        .collect();

    found.sort();
    Ok(found.into_iter().map(|(_, name)| parent.join(name)).collect())
}

/// Most recent backup of `file`, if any.
pub fn latest_backup(file: &str, backup_dir: &Path) -> Result<Option<PathBuf>, ChangeError> {
    Ok(list_backups(file, backup_dir)?.pop())
}
