//! Provision command implementation
//!
//! Resolves the source root, manifest and filesystem layout for the current
//! user, runs the provision operation against the real host and prints the
//! run summary.

use std::path::{Path, PathBuf};

use console::Style;

use crate::bootstrap::BootstrapOutcome;
use crate::cli::Cli;
use crate::config::layout::CONFIG_SOURCE_DIR;
use crate::config::{Layout, Manifest};
use crate::context::Context;
use crate::error::Result;
use crate::operations::{ProvisionOperation, ProvisionOptions, RunReport};
use crate::platform::PlatformSignals;
use crate::process::{SystemProbe, SystemRunner};
use crate::ui::Reporter;

pub fn run(cli: &Cli) -> Result<()> {
    let source_root = source_root(cli.source_dir.as_deref())?;
    tracing::debug!(source_root = %source_root.display(), "resolved source root");

    let manifest = Manifest::load(&source_root)?;
    let layout = Layout::resolve(&source_root, &manifest)?;
    let ctx = Context {
        layout: &layout,
        manifest: &manifest,
        runner: &SystemRunner,
        probe: &SystemProbe,
    };

    let mut reporter = Reporter::interactive();
    let report = ProvisionOperation::new(ctx, ProvisionOptions::from(cli))
        .execute(&PlatformSignals::from_host(), &mut reporter)?;

    print_summary(&report, &layout);
    Ok(())
}

fn source_root(flag: Option<&Path>) -> Result<PathBuf> {
    let dir = match flag {
        Some(dir) => dir.to_path_buf(),
        None => {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf));
            pick_source_root(&std::env::current_dir()?, exe_dir.as_deref())
        }
    };
    Ok(std::path::absolute(&dir)?)
}

/// The working directory if it holds the config tree, else the directory of
/// the executable if that one does
fn pick_source_root(cwd: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if cwd.join(CONFIG_SOURCE_DIR).is_dir() {
        return cwd.to_path_buf();
    }
    match exe_dir {
        Some(dir) if dir.join(CONFIG_SOURCE_DIR).is_dir() => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}

fn print_summary(report: &RunReport, layout: &Layout) {
    let bold = Style::new().bold();
    println!();
    println!("{}", Style::new().green().bold().apply_to("Summary"));
    println!("  {} {}", bold.apply_to("Platform:"), report.platform);

    for (stage, status) in &report.stages {
        println!("  {:<20} {}", format!("{stage}:"), status);
    }

    if let Some(deps) = &report.dependencies {
        println!(
            "  {} {} installed, {} already present, {} failed",
            bold.apply_to("Packages:"),
            deps.installed(),
            deps.already_present(),
            deps.failed()
        );
        for tool in deps.tools.iter().filter(|t| t.outcome.is_failed()) {
            println!("    {} {}", Style::new().red().apply_to(&tool.tool), tool.outcome);
        }
    }

    if let Some(outcome) = report.plugin_manager {
        let state = match outcome {
            BootstrapOutcome::AlreadyPresent => "already present",
            BootstrapOutcome::Cloned => "cloned",
        };
        println!(
            "  {} {} ({state})",
            bold.apply_to("Plugin manager:"),
            layout.plugin_manager_dir.display()
        );
    }

    if let Some(archive) = &report.archive {
        if let Some(binary) = &archive.binary {
            println!("  {} {}", bold.apply_to("Binary:"), binary.display());
        }
        if let Some(script) = &archive.shell_integration {
            println!("  {} {}", bold.apply_to("Shell integration:"), script.display());
        }
    }

    if let Some(backup) = &report.config.backup {
        println!("  {} {}", bold.apply_to("Backup:"), backup.display());
    }
    println!(
        "  {} {} ({} files)",
        bold.apply_to("Config:"),
        layout.config_target.display(),
        report.config.files_copied
    );

    if report.warnings.is_empty() {
        println!();
        println!("{}", Style::new().green().apply_to("Done."));
    } else {
        println!();
        println!(
            "{}",
            Style::new()
                .yellow()
                .bold()
                .apply_to(format!("Done with {} warning(s):", report.warnings.len()))
        );
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}
