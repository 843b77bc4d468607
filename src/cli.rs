//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// devboot - developer environment bootstrap
///
/// Installs the editor toolchain, bootstraps the plugin manager, installs the
/// bundled ticketing CLI and copies the editor configuration into place.
#[derive(Parser, Debug)]
#[command(
    name = "devboot",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provision a developer environment",
    long_about = "devboot detects the host platform, installs missing tools with the platform \
                  package manager, bootstraps the editor plugin manager, installs the bundled \
                  archive tool and copies the editor configuration into place, backing up any \
                  previous configuration.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  devboot\n    \
                  devboot --skip-deps --skip-sync\n    \
                  devboot --no-backup --source-dir ~/dotfiles\n\n\
                  \x1b[1m\x1b[32mEnvironment:\x1b[0m\n    \
                  DEVBOOT_SOURCE_DIR   default for --source-dir\n    \
                  DEVBOOT_PLATFORM     force the platform (macos, debian)"
)]
pub struct Cli {
    /// Skip dependency installation
    #[arg(long)]
    pub skip_deps: bool,

    /// Skip installing the tool from the bundled archive
    #[arg(long)]
    pub skip_archive_tool: bool,

    /// Skip cloning the plugin manager
    #[arg(long)]
    pub skip_plugin_manager: bool,

    /// Skip the headless plugin sync after copying the configuration
    #[arg(long)]
    pub skip_sync: bool,

    /// Delete an existing configuration instead of backing it up
    #[arg(long)]
    pub no_backup: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Directory holding the configuration tree and bundled assets (defaults to the
    /// current directory, or the executable's directory when only it has `nvim/`)
    #[arg(long, short = 's', env = "DEVBOOT_SOURCE_DIR", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,
}
