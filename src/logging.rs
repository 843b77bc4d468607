//! Diagnostic logging
//!
//! User-facing lines go through [`crate::ui::Reporter`]. This subscriber only
//! carries `tracing` diagnostics: external command lines, filesystem
//! decisions, git progress. It writes to stderr so it never mixes with the
//! run summary.

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "devboot=debug";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. `RUST_LOG` wins unless `--verbose` is set.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
