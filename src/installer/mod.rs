//! Dependency installation
//!
//! Installs every missing tool through the platform package manager, then
//! the extra tier through alternative mechanisms. A failing package never
//! aborts the batch: it becomes a [`InstallOutcome::Failed`] entry and a
//! warning. Only missing hard prerequisites and failed package-manager
//! preconditions are fatal.

pub mod extras;

use crate::context::Context;
use crate::deps::{
    HARD_PREREQUISITES, InstallOutcome, ToolSpec, check_presence, extra_tools, tool_specs,
};
use crate::error::{Result, platform::missing_prerequisites};
use crate::platform::{PackageManager, Platform};
use crate::process::CommandProbe;
use crate::ui::Reporter;

/// Outcome for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReport {
    pub tool: String,
    pub outcome: InstallOutcome,
}

/// Outcomes of a dependency-installation stage, in install order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub tools: Vec<ToolReport>,
}

impl InstallReport {
    fn record(&mut self, tool: &str, outcome: InstallOutcome) {
        self.tools.push(ToolReport {
            tool: tool.to_string(),
            outcome,
        });
    }

    pub fn outcome(&self, tool: &str) -> Option<&InstallOutcome> {
        self.tools.iter().find(|t| t.tool == tool).map(|t| &t.outcome)
    }

    pub fn installed(&self) -> usize {
        self.count(|o| *o == InstallOutcome::Installed)
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| *o == InstallOutcome::AlreadyPresent)
    }

    pub fn failed(&self) -> usize {
        self.count(InstallOutcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&InstallOutcome) -> bool) -> usize {
        self.tools.iter().filter(|t| pred(&t.outcome)).count()
    }
}

/// Fail when the package manager or a hard prerequisite is not on PATH
pub fn check_prerequisites(manager: &dyn PackageManager, probe: &dyn CommandProbe) -> Result<()> {
    let missing: Vec<&str> = std::iter::once(manager.program())
        .chain(HARD_PREREQUISITES.iter().copied())
        .filter(|tool| !probe.exists(tool))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing_prerequisites(&missing))
    }
}

/// Install all missing dependencies for `platform`
pub fn install_dependencies(
    ctx: &Context<'_>,
    platform: Platform,
    reporter: &mut Reporter,
) -> Result<InstallReport> {
    let manager = platform.package_manager(ctx.probe);
    check_prerequisites(manager.as_ref(), ctx.probe)?;

    let specs = tool_specs(platform, ctx.manifest.extra_packages(platform));
    let missing = check_presence(&specs, ctx.probe)
        .iter()
        .filter(|(_, present)| !present)
        .count();

    if missing == 0 {
        reporter.info(&format!("All {} packages already installed", specs.len()));
    } else {
        reporter.info(&format!(
            "Installing {missing} of {} packages with {}",
            specs.len(),
            manager.name()
        ));
        manager.prepare(ctx.runner, ctx.probe)?;
    }

    let mut report = InstallReport::default();
    for spec in &specs {
        let outcome = manager.install_if_missing(ctx.runner, ctx.probe, spec);
        note_outcome(reporter, spec, &outcome);
        report.record(&spec.name, outcome);
    }

    for tool in extra_tools(platform) {
        let outcome = extras::install_extra(ctx, &tool);
        note_outcome(
            reporter,
            &ToolSpec::new(&tool.name, &tool.name, &tool.command),
            &outcome,
        );
        report.record(&tool.name, outcome);
    }

    Ok(report)
}

fn note_outcome(reporter: &mut Reporter, spec: &ToolSpec, outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::AlreadyPresent => {
            tracing::debug!(tool = %spec.name, "already present");
        }
        InstallOutcome::Installed => reporter.success(&format!("Installed {}", spec.name)),
        InstallOutcome::Failed(reason) => {
            reporter.warn(format!("Failed to install {}: {reason}", spec.name));
        }
    }
}
