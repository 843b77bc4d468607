//! Plugin-manager bootstrap
//!
//! Clones the plugin manager once into its well-known path. An existing
//! checkout is left untouched; a failed clone is fatal because the editor
//! configuration cannot load without it.

use std::fs;

use crate::config::{Layout, PluginManagerSource};
use crate::error::Result;
use crate::git;
use crate::ui::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyPresent,
    Cloned,
}

pub fn bootstrap_plugin_manager(
    layout: &Layout,
    source: &PluginManagerSource,
    reporter: &Reporter,
) -> Result<BootstrapOutcome> {
    let target = &layout.plugin_manager_dir;
    if target.exists() {
        reporter.info(&format!("Plugin manager already at {}", target.display()));
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let pb = reporter.spinner(&format!("Cloning {} ({})", source.url, source.reference));
    let result = git::clone_at(&source.url, &source.reference, target);
    pb.finish_and_clear();

    match result {
        Ok(_) => {
            reporter.success(&format!("Cloned plugin manager into {}", target.display()));
            Ok(BootstrapOutcome::Cloned)
        }
        Err(e) => {
            if target.exists() {
                let _ = fs::remove_dir_all(target);
            }
            Err(e)
        }
    }
}
