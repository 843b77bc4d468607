//! Filesystem layout for a provisioning run
//!
//! Paths are resolved once from the source root, the home directory and the
//! XDG base directories, then passed by reference to every stage.

use std::env;
use std::path::{Path, PathBuf};

use super::Manifest;
use crate::error::{DevbootError, Result};
use crate::temp::temp_dir_base;

/// Editor configuration source tree, relative to the source root
pub const CONFIG_SOURCE_DIR: &str = "nvim";

/// Default archive bundle location, relative to the source root
pub const DEFAULT_ARCHIVE: &str = "assets/jira-cli.tar.gz";

/// Name of the archive tool (binary name and config directory name)
pub const ARCHIVE_TOOL: &str = "jira";

/// Every location the run reads from or writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Home directory of the user being provisioned
    pub home: PathBuf,
    /// Checkout containing the configuration tree and bundled assets
    pub source_root: PathBuf,
    /// Configuration tree copied into place (`<source>/nvim`)
    pub config_source: PathBuf,
    /// Archive bundle containing the auxiliary CLI tool
    pub archive: PathBuf,
    /// Editor configuration install target (`~/.config/nvim`)
    pub config_target: PathBuf,
    /// Plugin manager checkout (`~/.local/share/nvim/lazy/lazy.nvim`)
    pub plugin_manager_dir: PathBuf,
    /// User-local binary directory (`~/.local/bin`)
    pub bin_dir: PathBuf,
    /// Archive tool configuration directory (`~/.config/jira`)
    pub tool_config_dir: PathBuf,
    /// Shell-integration directories in order of preference
    pub shell_dirs: Vec<PathBuf>,
    /// Shell profiles that may source the integration directory (read only)
    pub shell_profiles: Vec<PathBuf>,
    /// Where scratch directories are created
    pub scratch_root: PathBuf,
}

impl Layout {
    /// Resolve the layout for the current user from `HOME` and the XDG variables
    pub fn resolve(source_root: &Path, manifest: &Manifest) -> Result<Self> {
        let home = dirs::home_dir().ok_or(DevbootError::HomeDirNotFound)?;
        let config_home = xdg_dir("XDG_CONFIG_HOME").unwrap_or_else(|| home.join(".config"));
        let data_home = xdg_dir("XDG_DATA_HOME").unwrap_or_else(|| home.join(".local/share"));
        Ok(Self::from_dirs(
            source_root,
            &home,
            &config_home,
            &data_home,
            manifest,
        ))
    }

    /// Build a layout rooted at `home` with the default XDG locations
    pub fn for_home(source_root: &Path, home: &Path, manifest: &Manifest) -> Self {
        Self::from_dirs(
            source_root,
            home,
            &home.join(".config"),
            &home.join(".local/share"),
            manifest,
        )
    }

    fn from_dirs(
        source_root: &Path,
        home: &Path,
        config_home: &Path,
        data_home: &Path,
        manifest: &Manifest,
    ) -> Self {
        let archive = manifest
            .archive
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE));

        Self {
            home: home.to_path_buf(),
            source_root: source_root.to_path_buf(),
            config_source: source_root.join(CONFIG_SOURCE_DIR),
            archive: source_root.join(archive),
            config_target: config_home.join("nvim"),
            plugin_manager_dir: data_home.join("nvim/lazy/lazy.nvim"),
            bin_dir: home.join(".local/bin"),
            tool_config_dir: config_home.join(ARCHIVE_TOOL),
            shell_dirs: vec![
                config_home.join("shell"),
                home.join(".zshrc.d"),
                home.join(".bashrc.d"),
            ],
            shell_profiles: vec![
                home.join(".zshrc"),
                home.join(".bashrc"),
                home.join(".profile"),
            ],
            scratch_root: temp_dir_base(),
        }
    }

    /// Use a different directory for scratch space
    #[must_use]
    pub fn with_scratch_root(mut self, scratch_root: impl Into<PathBuf>) -> Self {
        self.scratch_root = scratch_root.into();
        self
    }
}

/// XDG variables are only honoured when set to an absolute path
fn xdg_dir(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
}
