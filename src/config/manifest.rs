//! Provisioning manifest (`devboot.yaml`) data structures
//!
//! The manifest is optional. A missing file means "use the built-in
//! defaults"; a file that exists but cannot be read or parsed is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DevbootError, Result};
use crate::platform::Platform;

/// Manifest file name, looked up in the source root
pub const MANIFEST_FILE: &str = "devboot.yaml";

/// Default plugin manager remote
pub const DEFAULT_PLUGIN_MANAGER_URL: &str = "https://github.com/folke/lazy.nvim.git";

/// Default plugin manager reference (branch or tag)
pub const DEFAULT_PLUGIN_MANAGER_REF: &str = "stable";

/// Provisioning manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Packages appended to the default catalogue, per platform
    pub packages: ExtraPackages,

    /// Where the plugin manager is cloned from
    pub plugin_manager: PluginManagerSource,

    /// Archive bundle path, relative to the source root
    pub archive: Option<PathBuf>,
}

/// Additional package names per platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtraPackages {
    pub macos: Vec<String>,
    pub debian: Vec<String>,
}

/// Remote source of the plugin manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginManagerSource {
    pub url: String,
    pub reference: String,
}

impl Default for PluginManagerSource {
    fn default() -> Self {
        Self {
            url: DEFAULT_PLUGIN_MANAGER_URL.to_string(),
            reference: DEFAULT_PLUGIN_MANAGER_REF.to_string(),
        }
    }
}

impl Manifest {
    /// Parse a manifest from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        Ok(manifest)
    }

    /// Load `devboot.yaml` from the source root, falling back to defaults when absent
    pub fn load(source_root: &Path) -> Result<Self> {
        let path = source_root.join(MANIFEST_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no manifest, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| DevbootError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            DevbootError::ConfigParseFailed { reason, .. } => DevbootError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Extra packages configured for a platform
    pub fn extra_packages(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::MacOs => &self.packages.macos,
            Platform::DebianFamily => &self.packages.debian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::load(temp.path()).unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.plugin_manager.url, DEFAULT_PLUGIN_MANAGER_URL);
        assert_eq!(manifest.plugin_manager.reference, "stable");
        assert!(manifest.archive.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r"
packages:
  macos: [tmux]
  debian: [tmux, jq]
plugin_manager:
  url: https://example.com/lazy.git
  reference: v11.0.0
archive: vendor/jira.tar.gz
";
        let manifest = Manifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.extra_packages(Platform::MacOs), ["tmux"]);
        assert_eq!(manifest.extra_packages(Platform::DebianFamily), ["tmux", "jq"]);
        assert_eq!(manifest.plugin_manager.reference, "v11.0.0");
        assert_eq!(manifest.archive, Some(PathBuf::from("vendor/jira.tar.gz")));
    }

    #[test]
    fn test_partial_manifest_keeps_defaults() {
        let manifest = Manifest::from_yaml("packages:\n  debian: [htop]\n").unwrap();
        assert_eq!(manifest.plugin_manager, PluginManagerSource::default());
        assert!(manifest.packages.macos.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Manifest::from_yaml("pakages: {}\n").is_err());
    }

    #[test]
    fn test_invalid_manifest_reports_path() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILE), "packages: [unclosed").unwrap();

        let err = Manifest::load(temp.path()).unwrap_err();
        match err {
            DevbootError::ConfigParseFailed { path, .. } => {
                assert!(path.ends_with(MANIFEST_FILE));
            }
            other => panic!("Expected ConfigParseFailed, got {other:?}"),
        }
    }
}
