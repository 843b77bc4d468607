//! Provision operation
//!
//! Runs the stages strictly in order:
//! detect platform, install dependencies, bootstrap the plugin manager,
//! install the archive tool, materialize the config. Each optional stage
//! can be skipped by the caller. Fatal errors return immediately; the
//! archive stage is the only one whose errors are downgraded to warnings.

use std::fmt;

use crate::archive::{ArchiveSummary, install_archive_tool};
use crate::bootstrap::{BootstrapOutcome, bootstrap_plugin_manager};
use crate::cli::Cli;
use crate::context::Context;
use crate::error::{DevbootError, Result};
use crate::installer::{InstallReport, install_dependencies};
use crate::materialize::{MaterializeOptions, MaterializeSummary, materialize_config};
use crate::platform::{Platform, PlatformSignals, detect};
use crate::ui::Reporter;

/// Caller switches for a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub skip_deps: bool,
    pub skip_archive_tool: bool,
    pub skip_plugin_manager: bool,
    pub skip_sync: bool,
    pub backup: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            skip_deps: false,
            skip_archive_tool: false,
            skip_plugin_manager: false,
            skip_sync: false,
            backup: true,
        }
    }
}

impl From<&Cli> for ProvisionOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            skip_deps: cli.skip_deps,
            skip_archive_tool: cli.skip_archive_tool,
            skip_plugin_manager: cli.skip_plugin_manager,
            skip_sync: cli.skip_sync,
            backup: !cli.no_backup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DetectPlatform,
    InstallDeps,
    BootstrapPluginManager,
    InstallArchiveTool,
    MaterializeConfig,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::DetectPlatform => "platform detection",
            Stage::InstallDeps => "dependencies",
            Stage::BootstrapPluginManager => "plugin manager",
            Stage::InstallArchiveTool => "archive tool",
            Stage::MaterializeConfig => "configuration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Skipped,
    /// Finished, but recorded at least one warning
    Degraded,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageStatus::Completed => "completed",
            StageStatus::Skipped => "skipped",
            StageStatus::Degraded => "completed with warnings",
        };
        f.write_str(name)
    }
}

/// Everything a finished run did
#[derive(Debug, Clone)]
pub struct RunReport {
    pub platform: Platform,
    pub stages: Vec<(Stage, StageStatus)>,
    pub dependencies: Option<InstallReport>,
    pub plugin_manager: Option<BootstrapOutcome>,
    pub archive: Option<ArchiveSummary>,
    pub config: MaterializeSummary,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn status(&self, stage: Stage) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, status)| *status)
    }
}

pub struct ProvisionOperation<'a> {
    ctx: Context<'a>,
    options: ProvisionOptions,
}

impl<'a> ProvisionOperation<'a> {
    pub fn new(ctx: Context<'a>, options: ProvisionOptions) -> Self {
        Self { ctx, options }
    }

    /// Run every stage. Unsupported platforms fail before anything is touched.
    pub fn execute(&self, signals: &PlatformSignals, reporter: &mut Reporter) -> Result<RunReport> {
        let ctx = &self.ctx;
        let mut stages = Vec::with_capacity(5);

        let platform = detect(signals)?;
        tracing::debug!(platform = platform.id(), "detected platform");
        reporter.info(&format!("Platform: {platform}"));
        stages.push((Stage::DetectPlatform, StageStatus::Completed));

        let dependencies = if self.options.skip_deps {
            stages.push((Stage::InstallDeps, StageStatus::Skipped));
            None
        } else {
            reporter.stage("Installing dependencies");
            let before = reporter.warnings().len();
            let report = install_dependencies(ctx, platform, reporter)?;
            stages.push((Stage::InstallDeps, status_since(reporter, before)));
            Some(report)
        };

        let plugin_manager = if self.options.skip_plugin_manager {
            stages.push((Stage::BootstrapPluginManager, StageStatus::Skipped));
            None
        } else {
            reporter.stage("Bootstrapping plugin manager");
            let outcome =
                bootstrap_plugin_manager(ctx.layout, &ctx.manifest.plugin_manager, reporter)?;
            stages.push((Stage::BootstrapPluginManager, StageStatus::Completed));
            Some(outcome)
        };

        let archive = if self.options.skip_archive_tool {
            stages.push((Stage::InstallArchiveTool, StageStatus::Skipped));
            None
        } else {
            reporter.stage("Installing archive tool");
            let before = reporter.warnings().len();
            match install_archive_tool(ctx, reporter) {
                Ok(summary) => {
                    stages.push((Stage::InstallArchiveTool, status_since(reporter, before)));
                    Some(summary)
                }
                Err(e @ DevbootError::ArchiveNotFound { .. }) => {
                    reporter.warn(format!("{e}; skipping archive tool"));
                    stages.push((Stage::InstallArchiveTool, StageStatus::Skipped));
                    None
                }
                Err(e) => {
                    reporter.warn(format!("Archive tool not installed: {e}"));
                    stages.push((Stage::InstallArchiveTool, StageStatus::Degraded));
                    None
                }
            }
        };

        reporter.stage("Materializing configuration");
        let before = reporter.warnings().len();
        let config = materialize_config(
            ctx,
            MaterializeOptions {
                backup: self.options.backup,
                sync_plugins: !self.options.skip_sync,
            },
            reporter,
        )?;
        stages.push((Stage::MaterializeConfig, status_since(reporter, before)));

        Ok(RunReport {
            platform,
            stages,
            dependencies,
            plugin_manager,
            archive,
            config,
            warnings: reporter.warnings().to_vec(),
        })
    }
}

fn status_since(reporter: &Reporter, warnings_before: usize) -> StageStatus {
    if reporter.warnings().len() > warnings_before {
        StageStatus::Degraded
    } else {
        StageStatus::Completed
    }
}
