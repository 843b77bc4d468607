//! External process execution
//!
//! Every package-manager call, download and editor invocation goes through
//! [`CommandRunner`]; every "is this tool on PATH" question goes through
//! [`CommandProbe`]. The system implementations block until the child exits.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Result, process::command_failed};

/// Number of trailing stderr lines kept in a failure reason
const STDERR_TAIL_LINES: usize = 5;

/// Runs external programs to completion
pub trait CommandRunner {
    /// Run `program` with `args`, failing on spawn error or non-zero exit
    fn run(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Answers whether a command is resolvable on the search path
pub trait CommandProbe {
    fn find(&self, command: &str) -> Option<PathBuf>;

    fn exists(&self, command: &str) -> bool {
        self.find(command).is_some()
    }
}

/// Render a command line for logs and error messages
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs commands on the host with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        let line = display_command(program, args);
        tracing::debug!(command = %line, "running");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .output()
            .map_err(|e| command_failed(&line, e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for out_line in stdout.lines() {
            tracing::debug!("{out_line}");
        }

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr_tail(&stderr);
        let reason = if tail.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {}", output.status, tail)
        };
        Err(command_failed(line, reason))
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}

/// Looks commands up on `PATH` with the `which` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl CommandProbe for SystemProbe {
    fn find(&self, command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command("apt-get", &["install", "-y", "fzf"]),
            "apt-get install -y fzf"
        );
        assert_eq!(display_command("true", &[]), "true");
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = "one\ntwo\n\nthree\nfour\nfive\nsix\n";
        assert_eq!(stderr_tail(stderr), "two | three | four | five | six");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success_and_failure() {
        assert!(SystemRunner.run("true", &[]).is_ok());
        let err = SystemRunner.run("false", &[]).unwrap_err();
        assert!(err.to_string().contains("Command failed: false"));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let result = SystemRunner.run("devboot-definitely-not-a-program", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_system_probe_missing_command() {
        assert!(!SystemProbe.exists("devboot-definitely-not-a-program"));
    }

    #[test]
    fn test_fake_host_provides_command_after_install() {
        let host = fake::FakeHost::new().providing("ripgrep", "rg");
        assert!(!host.exists("rg"));
        host.run("brew", &["install", "ripgrep"]).unwrap();
        assert!(host.exists("rg"));
        assert_eq!(host.calls(), vec!["brew install ripgrep".to_string()]);
    }
}
