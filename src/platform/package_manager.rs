//! Package managers for the supported platforms
//!
//! Both variants expose the same install / query-installed interface; the
//! installer never branches on the platform itself.

use crate::deps::{InstallOutcome, ToolSpec};
use crate::error::{Result, platform::precondition_failed};
use crate::process::{CommandProbe, CommandRunner};

/// Debian PPA providing a current Neovim
pub const NEOVIM_PPA: &str = "ppa:neovim-ppa/unstable";

/// Installation actions offered by a platform package manager
pub trait PackageManager {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Executable that must be on PATH for this manager to work
    fn program(&self) -> &'static str;

    /// Steps that must succeed before the package batch runs. Failures are fatal.
    fn prepare(&self, runner: &dyn CommandRunner, probe: &dyn CommandProbe) -> Result<()>;

    /// Install a single package
    fn install(&self, runner: &dyn CommandRunner, package: &str) -> Result<()>;

    /// Whether the package database reports `package` as installed
    fn query_installed(&self, runner: &dyn CommandRunner, package: &str) -> bool;

    /// Install the tool unless its command is already resolvable
    fn install_if_missing(
        &self,
        runner: &dyn CommandRunner,
        probe: &dyn CommandProbe,
        tool: &ToolSpec,
    ) -> InstallOutcome {
        if probe.exists(&tool.command) {
            tracing::debug!(tool = %tool.name, command = %tool.command, "already present");
            return InstallOutcome::AlreadyPresent;
        }

        if let Err(e) = self.install(runner, &tool.package) {
            return InstallOutcome::Failed(e.to_string());
        }

        if probe.exists(&tool.command) {
            InstallOutcome::Installed
        } else if self.query_installed(runner, &tool.package) {
            InstallOutcome::Failed(format!(
                "package '{}' is installed but '{}' is not on PATH",
                tool.package, tool.command
            ))
        } else {
            InstallOutcome::Failed(format!(
                "'{}' not found after installing '{}'",
                tool.command, tool.package
            ))
        }
    }
}

/// Homebrew on macOS
#[derive(Debug, Clone, Copy, Default)]
pub struct Homebrew;

impl PackageManager for Homebrew {
    fn name(&self) -> &'static str {
        "Homebrew"
    }

    fn program(&self) -> &'static str {
        "brew"
    }

    fn prepare(&self, _runner: &dyn CommandRunner, _probe: &dyn CommandProbe) -> Result<()> {
        Ok(())
    }

    fn install(&self, runner: &dyn CommandRunner, package: &str) -> Result<()> {
        runner.run("brew", &["install", package])
    }

    fn query_installed(&self, runner: &dyn CommandRunner, package: &str) -> bool {
        runner.run("brew", &["list", "--versions", package]).is_ok()
    }
}

/// apt on Debian-family Linux, elevated through `sudo` when not running as root
#[derive(Debug, Clone, Copy, Default)]
pub struct Apt {
    sudo: bool,
}

impl Apt {
    pub fn new(sudo: bool) -> Self {
        Self { sudo }
    }

    /// Use `sudo` when it is available and the current user is not root
    pub fn for_host(probe: &dyn CommandProbe) -> Self {
        let is_root = running_as_root(|key| std::env::var(key).ok());
        Self::new(!is_root && probe.exists("sudo"))
    }

    fn run_elevated(&self, runner: &dyn CommandRunner, program: &str, args: &[&str]) -> Result<()> {
        if self.sudo {
            let mut elevated = Vec::with_capacity(args.len() + 1);
            elevated.push(program);
            elevated.extend_from_slice(args);
            runner.run("sudo", &elevated)
        } else {
            runner.run(program, args)
        }
    }
}

/// Root check over `EUID`/`UID` first, then `USER`/`LOGNAME`
fn running_as_root(lookup: impl Fn(&str) -> Option<String>) -> bool {
    for key in ["EUID", "UID"] {
        if let Some(id) = lookup(key).and_then(|v| v.trim().parse::<u32>().ok()) {
            return id == 0;
        }
    }
    ["USER", "LOGNAME"]
        .iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        .is_some_and(|name| name.trim() == "root")
}

impl PackageManager for Apt {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn program(&self) -> &'static str {
        "apt-get"
    }

    fn prepare(&self, runner: &dyn CommandRunner, probe: &dyn CommandProbe) -> Result<()> {
        // The distribution neovim is too old for the bundled configuration
        if !probe.exists("nvim") {
            if !probe.exists("add-apt-repository") {
                self.run_elevated(
                    runner,
                    "apt-get",
                    &["install", "-y", "software-properties-common"],
                )
                .map_err(|e| {
                    precondition_failed("install software-properties-common", e.to_string())
                })?;
            }
            self.run_elevated(runner, "add-apt-repository", &["-y", NEOVIM_PPA])
                .map_err(|e| precondition_failed(format!("add {NEOVIM_PPA}"), e.to_string()))?;
        }

        self.run_elevated(runner, "apt-get", &["update"])
            .map_err(|e| precondition_failed("apt-get update", e.to_string()))
    }

    fn install(&self, runner: &dyn CommandRunner, package: &str) -> Result<()> {
        self.run_elevated(runner, "apt-get", &["install", "-y", package])
    }

    fn query_installed(&self, runner: &dyn CommandRunner, package: &str) -> bool {
        runner.run("dpkg", &["-s", package]).is_ok()
    }
}
