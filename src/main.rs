//! devboot - developer environment bootstrap
//!
//! Detects the host platform, installs the editor toolchain, bootstraps the
//! plugin manager, installs a bundled CLI tool and materializes the editor
//! configuration, backing up whatever was there before.

use clap::{CommandFactory, Parser};

mod archive;
mod bootstrap;
mod cli;
mod commands;
mod common;
mod config;
mod context;
mod deps;
mod error;
mod git;
mod installer;
mod logging;
mod materialize;
mod operations;
mod platform;
mod process;
mod temp;
mod ui;

use cli::Cli;

/// Exit status after an interrupt, as a shell would report SIGINT
const INTERRUPTED_EXIT: i32 = 130;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        temp::interrupt();
        eprintln!();
        ui::error("Interrupted");
        std::process::exit(INTERRUPTED_EXIT);
    }) {
        tracing::warn!("could not install interrupt handler: {e}");
    }

    if let Err(e) = commands::provision::run(&cli) {
        ui::error(&e.to_string());
        if let Some(help) = miette::Diagnostic::help(&e) {
            eprintln!("  {help}");
        }
        eprintln!();
        eprintln!("Run '{} --help' for usage.", Cli::command().get_name());
        std::process::exit(1);
    }
}
