//! Shell-integration placement
//!
//! Candidate directories are tried in order; the first that exists wins,
//! otherwise the first candidate is created. Shell profiles are only read,
//! never written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Pick the integration directory, creating the default one if none exist
pub fn select_integration_dir(candidates: &[PathBuf]) -> io::Result<PathBuf> {
    if let Some(existing) = candidates.iter().find(|c| c.is_dir()) {
        return Ok(existing.clone());
    }
    let default = candidates.first().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "no shell integration directory candidates",
        )
    })?;
    fs::create_dir_all(default)?;
    Ok(default.clone())
}

/// Copy the integration script into the selected directory
pub fn install_integration(script: &Path, candidates: &[PathBuf]) -> io::Result<PathBuf> {
    let dir = select_integration_dir(candidates)?;
    let name = script.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "integration script has no file name",
        )
    })?;
    let dest = dir.join(name);
    fs::copy(script, &dest)?;
    Ok(dest)
}

/// Whether any profile mentions `dir`, either verbatim or relative to home
/// (`~/...` or `$HOME/...`)
pub fn is_sourced(profiles: &[PathBuf], dir: &Path, home: &Path) -> bool {
    let mut needles = vec![dir.display().to_string()];
    if let Ok(relative) = dir.strip_prefix(home) {
        let relative = relative.display().to_string();
        needles.push(format!("~/{relative}"));
        needles.push(format!("$HOME/{relative}"));
        needles.push(format!("${{HOME}}/{relative}"));
    }

    profiles
        .iter()
        .filter_map(|profile| fs::read_to_string(profile).ok())
        .any(|content| needles.iter().any(|n| content.contains(n.as_str())))
}
