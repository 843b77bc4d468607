//! User-facing output
//!
//! All progress and warning lines go through [`Reporter`]. The interactive
//! reporter prints styled lines and spinners; the silent reporter prints
//! nothing. Both record every warning so the run can summarise them and
//! tests can assert on them.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// How output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Interactive,
    Silent,
}

/// Progress and warning reporter for a provisioning run
#[derive(Debug)]
pub struct Reporter {
    mode: Mode,
    warnings: Vec<String>,
}

impl Reporter {
    /// Reporter writing styled lines to the terminal
    pub fn interactive() -> Self {
        Self {
            mode: Mode::Interactive,
            warnings: Vec::new(),
        }
    }

    /// Reporter that only records warnings
    pub fn silent() -> Self {
        Self {
            mode: Mode::Silent,
            warnings: Vec::new(),
        }
    }

    fn is_silent(&self) -> bool {
        self.mode == Mode::Silent
    }

    /// Announce a stage of the run
    pub fn stage(&self, title: &str) {
        if self.is_silent() {
            return;
        }
        println!();
        println!(
            "{} {}",
            Style::new().cyan().bold().apply_to("==>"),
            Style::new().bold().apply_to(title)
        );
    }

    pub fn info(&self, message: &str) {
        if !self.is_silent() {
            println!("    {message}");
        }
    }

    pub fn success(&self, message: &str) {
        if !self.is_silent() {
            println!("  {} {}", Style::new().green().apply_to("✓"), message);
        }
    }

    /// Print and record a recoverable warning
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.is_silent() {
            eprintln!(
                "  {} {}",
                Style::new().yellow().bold().apply_to("Warning:"),
                message
            );
        }
        tracing::debug!(%message, "warning recorded");
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Spinner for a blocking step; hidden when silent
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.is_silent() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Print a fatal error line
pub fn error(message: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("Error:"), message);
}
