//! Timestamped backups of an existing configuration directory

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Infix between the target name and the timestamp
pub const BACKUP_INFIX: &str = ".backup.";

/// Second-granularity timestamp format
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Sibling path for a backup of `target` taken at `now`. A numeric suffix is
/// added when a backup from the same second already exists.
pub fn backup_path(target: &Path, now: NaiveDateTime) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let base = format!("{name}{BACKUP_INFIX}{}", now.format(TIMESTAMP_FORMAT));
    let parent = target.parent().unwrap_or_else(|| Path::new("."));

    let mut candidate = parent.join(&base);
    let mut n = 1;
    while candidate.exists() {
        candidate = parent.join(format!("{base}-{n}"));
        n += 1;
    }
    candidate
}

/// Backups of `target` currently present next to it, sorted by name
pub fn list_backups(target: &Path) -> Vec<PathBuf> {
    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return Vec::new();
    };
    let prefix = format!("{}{BACKUP_INFIX}", name.to_string_lossy());

    let mut backups: Vec<PathBuf> = fs::read_dir(parent)
        .into_iter()
        .flatten()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(&prefix))
        .map(|e| e.path())
        .collect();
    backups.sort();
    backups
}
