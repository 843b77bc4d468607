//! File system and configuration tree errors

use std::path::Path;

use super::DevbootError;

pub fn config_source_missing(path: impl AsRef<Path>) -> DevbootError {
    DevbootError::ConfigSourceMissing {
        path: path.as_ref().display().to_string(),
    }
}

pub fn config_overlap(source: impl AsRef<Path>, target: impl AsRef<Path>) -> DevbootError {
    DevbootError::ConfigOverlap {
        source_dir: source.as_ref().display().to_string(),
        target: target.as_ref().display().to_string(),
    }
}

pub fn backup_failed(path: impl AsRef<Path>, reason: impl ToString) -> DevbootError {
    DevbootError::BackupFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn write_failed(path: impl AsRef<Path>, reason: impl ToString) -> DevbootError {
    DevbootError::FileWriteFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn archive_not_found(path: impl AsRef<Path>) -> DevbootError {
    DevbootError::ArchiveNotFound {
        path: path.as_ref().display().to_string(),
    }
}

pub fn archive_extract_failed(path: impl AsRef<Path>, reason: impl ToString) -> DevbootError {
    DevbootError::ArchiveExtractFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
