//! Extra-tier tools
//!
//! Tools missing from the default package source of a platform are installed
//! through an alternative mechanism instead of the package manager.

use crate::platform::Platform;

/// Pinned lazygit release fetched on Debian
pub const LAZYGIT_VERSION: &str = "0.44.1";

/// How an extra tool is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraMethod {
    /// Download a release tarball and install `binary` from it
    Download { url: String, binary: String },
    /// Install through a secondary package manager (npm, then cargo)
    Secondary { package: String },
}

/// A tool installed outside the platform package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraTool {
    pub name: String,
    pub command: String,
    pub method: ExtraMethod,
}

/// Extra tools for a platform
pub fn extra_tools(platform: Platform) -> Vec<ExtraTool> {
    match platform {
        Platform::MacOs => Vec::new(),
        Platform::DebianFamily => vec![
            ExtraTool {
                name: "lazygit".to_string(),
                command: "lazygit".to_string(),
                method: ExtraMethod::Download {
                    url: lazygit_url(LAZYGIT_VERSION, std::env::consts::ARCH),
                    binary: "lazygit".to_string(),
                },
            },
            ExtraTool {
                name: "tree-sitter".to_string(),
                command: "tree-sitter".to_string(),
                method: ExtraMethod::Secondary {
                    package: "tree-sitter-cli".to_string(),
                },
            },
        ],
    }
}

/// Release asset URL for a lazygit version and Rust target architecture
pub fn lazygit_url(version: &str, arch: &str) -> String {
    let arch = match arch {
        "aarch64" => "arm64",
        "x86" => "32-bit",
        "arm" => "armv6",
        other => other,
    };
    format!(
        "https://github.com/jesseduffield/lazygit/releases/download/v{version}/lazygit_{version}_Linux_{arch}.tar.gz"
    )
}
