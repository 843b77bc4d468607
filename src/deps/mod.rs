//! Dependency resolution
//!
//! Maps abstract tool names to per-platform package names and to the
//! executable each package actually puts on PATH. Everything here is a pure
//! function of the platform and the tool name, except [`check_presence`]
//! which asks a [`CommandProbe`].

pub mod extras;

use std::fmt;

pub use extras::{ExtraMethod, ExtraTool, extra_tools};

use crate::platform::Platform;
use crate::process::CommandProbe;

/// One installable dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Abstract tool name
    pub name: String,
    /// Package name for the current platform
    pub package: String,
    /// Command that must be resolvable after installation
    pub command: String,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            command: command.into(),
        }
    }
}

/// Result of provisioning one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyPresent,
    Installed,
    Failed(String),
}

impl InstallOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, InstallOutcome::Failed(_))
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallOutcome::AlreadyPresent => write!(f, "already present"),
            InstallOutcome::Installed => write!(f, "installed"),
            InstallOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

struct CatalogueEntry {
    name: &'static str,
    macos: Option<&'static str>,
    debian: Option<&'static str>,
}

/// Default tools, in install order. `None` means the tool comes from the
/// extra tier on that platform (see [`extras`]).
const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        name: "git",
        macos: Some("git"),
        debian: Some("git"),
    },
    CatalogueEntry {
        name: "neovim",
        macos: Some("neovim"),
        debian: Some("neovim"),
    },
    CatalogueEntry {
        name: "ripgrep",
        macos: Some("ripgrep"),
        debian: Some("ripgrep"),
    },
    CatalogueEntry {
        name: "fd",
        macos: Some("fd"),
        debian: Some("fd-find"),
    },
    CatalogueEntry {
        name: "fzf",
        macos: Some("fzf"),
        debian: Some("fzf"),
    },
    CatalogueEntry {
        name: "node",
        macos: Some("node"),
        debian: Some("nodejs"),
    },
    CatalogueEntry {
        name: "python",
        macos: Some("python3"),
        debian: Some("python3"),
    },
    CatalogueEntry {
        name: "curl",
        macos: Some("curl"),
        debian: Some("curl"),
    },
    CatalogueEntry {
        name: "unzip",
        macos: Some("unzip"),
        debian: Some("unzip"),
    },
    CatalogueEntry {
        name: "compiler",
        macos: Some("gcc"),
        debian: Some("build-essential"),
    },
    CatalogueEntry {
        name: "lazygit",
        macos: Some("lazygit"),
        debian: None,
    },
    CatalogueEntry {
        name: "tree-sitter",
        macos: Some("tree-sitter"),
        debian: None,
    },
];

/// Packages whose executable is not named after the package
const PACKAGE_COMMANDS: &[(&str, &str)] = &[
    ("neovim", "nvim"),
    ("ripgrep", "rg"),
    ("fd-find", "fdfind"),
    ("nodejs", "node"),
    ("build-essential", "gcc"),
    ("tree-sitter-cli", "tree-sitter"),
];

/// Tools that must already exist before dependency installation can start
pub const HARD_PREREQUISITES: &[&str] = &["git", "tar"];

/// Package name for a tool on a platform. Unknown tools are their own package.
pub fn package_name(platform: Platform, tool: &str) -> Option<String> {
    match CATALOGUE.iter().find(|e| e.name == tool) {
        Some(entry) => match platform {
            Platform::MacOs => entry.macos,
            Platform::DebianFamily => entry.debian,
        }
        .map(str::to_string),
        None => Some(tool.to_string()),
    }
}

/// Executable a tool provides on a platform
pub fn command_name(platform: Platform, tool: &str) -> String {
    let package = package_name(platform, tool).unwrap_or_else(|| tool.to_string());
    PACKAGE_COMMANDS
        .iter()
        .find(|(p, _)| *p == package)
        .map_or(package.clone(), |(_, c)| (*c).to_string())
}

/// Ordered tool list for a platform, followed by manifest extras
pub fn tool_specs(platform: Platform, extra_packages: &[String]) -> Vec<ToolSpec> {
    let mut specs: Vec<ToolSpec> = CATALOGUE
        .iter()
        .filter_map(|entry| {
            package_name(platform, entry.name).map(|package| {
                ToolSpec::new(entry.name, package, command_name(platform, entry.name))
            })
        })
        .collect();

    for package in extra_packages {
        if specs.iter().any(|s| &s.package == package) {
            continue;
        }
        specs.push(ToolSpec::new(
            package.as_str(),
            package.as_str(),
            command_name(platform, package),
        ));
    }

    specs
}

/// Pair every tool with whether its command is currently resolvable
pub fn check_presence<'a>(
    specs: &'a [ToolSpec],
    probe: &dyn CommandProbe,
) -> Vec<(&'a ToolSpec, bool)> {
    specs
        .iter()
        .map(|spec| (spec, probe.exists(&spec.command)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::FakeHost;

    #[test]
    fn test_command_differs_from_package() {
        assert_eq!(command_name(Platform::DebianFamily, "fd"), "fdfind");
        assert_eq!(command_name(Platform::MacOs, "fd"), "fd");
        assert_eq!(command_name(Platform::MacOs, "neovim"), "nvim");
        assert_eq!(command_name(Platform::DebianFamily, "node"), "node");
        assert_eq!(command_name(Platform::DebianFamily, "compiler"), "gcc");
        assert_eq!(command_name(Platform::MacOs, "ripgrep"), "rg");
    }

    #[test]
    fn test_unknown_tool_maps_to_itself() {
        assert_eq!(package_name(Platform::DebianFamily, "tmux"), Some("tmux".to_string()));
        assert_eq!(command_name(Platform::DebianFamily, "tmux"), "tmux");
    }

    #[test]
    fn test_debian_excludes_extra_tier_tools() {
        let specs = tool_specs(Platform::DebianFamily, &[]);
        assert!(specs.iter().all(|s| s.name != "lazygit" && s.name != "tree-sitter"));
        assert_eq!(package_name(Platform::DebianFamily, "lazygit"), None);
    }

    #[test]
    fn test_macos_includes_every_tool() {
        let specs = tool_specs(Platform::MacOs, &[]);
        assert_eq!(specs.len(), CATALOGUE.len());
        assert_eq!(specs[0].name, "git");
        assert_eq!(specs[1].command, "nvim");
    }

    #[test]
    fn test_extra_packages_appended_and_deduplicated() {
        let extras = vec!["tmux".to_string(), "fzf".to_string()];
        let specs = tool_specs(Platform::DebianFamily, &extras);
        assert_eq!(specs.last().unwrap().package, "tmux");
        assert_eq!(specs.iter().filter(|s| s.package == "fzf").count(), 1);
    }

    #[test]
    fn test_check_presence() {
        let host = FakeHost::new().with_commands(&["git", "rg"]);
        let specs = tool_specs(Platform::MacOs, &[]);
        let presence = check_presence(&specs, &host);
        let present: Vec<&str> = presence
            .iter()
            .filter(|(_, present)| *present)
            .map(|(s, _)| s.name.as_str())
            .collect();
        assert_eq!(present, vec!["git", "ripgrep"]);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(InstallOutcome::AlreadyPresent.to_string(), "already present");
        assert_eq!(
            InstallOutcome::Failed("boom".to_string()).to_string(),
            "failed: boom"
        );
        assert!(InstallOutcome::Failed(String::new()).is_failed());
        assert!(!InstallOutcome::Installed.is_failed());
    }
}
