//! Alternative install mechanisms for the extra tier

use std::path::Path;

use crate::archive::{extract_tar_gz, find_file};
use crate::common::fs::install_executable;
use crate::context::Context;
use crate::deps::{ExtraMethod, ExtraTool, InstallOutcome};
use crate::error::{Result, fs::write_failed, process::command_failed};
use crate::temp::ScratchDir;

/// Install one extra tool: skip if present, try once, report failure as an outcome
pub fn install_extra(ctx: &Context<'_>, tool: &ExtraTool) -> InstallOutcome {
    if is_present(ctx, &tool.command) {
        return InstallOutcome::AlreadyPresent;
    }

    let attempt = match &tool.method {
        ExtraMethod::Download { url, binary } => download_binary(ctx, url, binary),
        ExtraMethod::Secondary { package } => install_secondary(ctx, package),
    };

    match attempt {
        Err(e) => InstallOutcome::Failed(e.to_string()),
        Ok(()) if is_present(ctx, &tool.command) => InstallOutcome::Installed,
        Ok(()) => InstallOutcome::Failed(format!("'{}' not found after install", tool.command)),
    }
}

fn is_present(ctx: &Context<'_>, command: &str) -> bool {
    ctx.probe.exists(command) || ctx.layout.bin_dir.join(command).is_file()
}

/// Fetch a release tarball with curl and install `binary` from it
fn download_binary(ctx: &Context<'_>, url: &str, binary: &str) -> Result<()> {
    let scratch = ScratchDir::new_in(&ctx.layout.scratch_root, "download")?;
    let tarball = scratch.path().join("download.tar.gz");
    let tarball_arg = tarball.display().to_string();

    ctx.runner.run("curl", &["-fsSL", "-o", &tarball_arg, url])?;

    let unpacked = scratch.path().join("unpacked");
    extract_tar_gz(&tarball, &unpacked)?;

    let found = find_file(&unpacked, binary).ok_or_else(|| {
        command_failed(format!("curl {url}"), format!("no '{binary}' in download"))
    })?;
    let dest = ctx.layout.bin_dir.join(binary);
    install(&found, &dest)
}

fn install(src: &Path, dest: &Path) -> Result<()> {
    install_executable(src, dest)
        .map(|_| ())
        .map_err(|e| write_failed(dest, e))
}

/// Install through npm, falling back to cargo
fn install_secondary(ctx: &Context<'_>, package: &str) -> Result<()> {
    if ctx.probe.exists("npm") {
        ctx.runner.run("npm", &["install", "-g", package])
    } else if ctx.probe.exists("cargo") {
        ctx.runner.run("cargo", &["install", "--locked", package])
    } else {
        Err(command_failed(
            format!("install {package}"),
            "neither npm nor cargo is available",
        ))
    }
}
