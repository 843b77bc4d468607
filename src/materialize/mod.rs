//! Config materializer
//!
//! Replaces the editor configuration directory with the source tree. An
//! existing target is renamed to a timestamped backup (or deleted when
//! backups are off) before anything is copied, and a copy that fails
//! midway removes the partial target so it ends up no worse than missing.

pub mod backup;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::common::fs::{CopyOptions, copy_dir_recursive, remove_path, resolve_path};
use crate::context::Context;
use crate::error::{
    Result,
    fs::{backup_failed, config_overlap, config_source_missing, write_failed},
};
use crate::ui::Reporter;

/// Entry point copied before the supporting subtree
pub const ENTRY_POINT: &str = "init.lua";

const EDITOR: &str = "nvim";
const SYNC_ARGS: &[&str] = &["--headless", "+Lazy! sync", "+qa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Rename an existing target instead of deleting it
    pub backup: bool,
    /// Run the editor headless afterwards to sync plugins
    pub sync_plugins: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            backup: true,
            sync_plugins: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    pub backup: Option<PathBuf>,
    pub removed_previous: bool,
    pub files_copied: usize,
    pub synced: bool,
}

pub fn materialize_config(
    ctx: &Context<'_>,
    options: MaterializeOptions,
    reporter: &mut Reporter,
) -> Result<MaterializeSummary> {
    let source = &ctx.layout.config_source;
    let target = &ctx.layout.config_target;

    if !source.is_dir() {
        return Err(config_source_missing(source));
    }
    if overlaps(source, target).map_err(|e| write_failed(target, e))? {
        return Err(config_overlap(source, target));
    }
    if !source.join(ENTRY_POINT).is_file() {
        reporter.warn(format!(
            "{} has no {ENTRY_POINT}; the editor will not load it",
            source.display()
        ));
    }

    let mut summary = MaterializeSummary::default();

    if target.exists() || target.is_symlink() {
        if options.backup {
            let backup = backup::backup_path(target, Local::now().naive_local());
            fs::rename(target, &backup).map_err(|e| backup_failed(target, e))?;
            reporter.info(&format!("Backed up existing config to {}", backup.display()));
            summary.backup = Some(backup);
        } else {
            remove_path(target).map_err(|e| write_failed(target, e))?;
            tracing::debug!(target = %target.display(), "removed previous config");
            summary.removed_previous = true;
        }
    }

    fs::create_dir_all(target).map_err(|e| write_failed(target, e))?;

    let copy = CopyOptions::exclude_git().first(ENTRY_POINT);
    summary.files_copied = match copy_dir_recursive(source, target, &copy) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_dir_all(target);
            return Err(write_failed(target, e));
        }
    };
    reporter.success(&format!(
        "Copied {} files into {}",
        summary.files_copied,
        target.display()
    ));

    if options.sync_plugins {
        summary.synced = sync_plugins(ctx, reporter);
    }

    Ok(summary)
}

/// Whether replacing `target` would touch `source` or copy it into itself.
/// A symlinked target is judged by the link, which is what gets replaced.
fn overlaps(source: &Path, target: &Path) -> io::Result<bool> {
    let source = resolve_path(source)?;
    let target = match (target.parent(), target.file_name()) {
        (Some(parent), Some(name)) => resolve_path(parent)?.join(name),
        _ => resolve_path(target)?,
    };
    Ok(source.starts_with(&target) || target.starts_with(&source))
}

fn sync_plugins(ctx: &Context<'_>, reporter: &mut Reporter) -> bool {
    if !ctx.probe.exists(EDITOR) {
        reporter.warn(format!(
            "{EDITOR} not found; run `{EDITOR} --headless \"+Lazy! sync\" +qa` once it is installed"
        ));
        return false;
    }

    let pb = reporter.spinner("Syncing plugins");
    let result = ctx.runner.run(EDITOR, SYNC_ARGS);
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            reporter.success("Plugins synced");
            true
        }
        Err(e) => {
            reporter.warn(format!("Plugin sync failed, retry manually: {e}"));
            false
        }
    }
}
