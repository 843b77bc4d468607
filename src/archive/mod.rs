//! Archive tool installation
//!
//! Installs the auxiliary CLI shipped as a tarball in the source checkout:
//! the binary goes to the user-local bin dir, supplementary assets to the
//! tool's config dir, and the shell-integration script to the preferred
//! shell-integration directory.
//!
//! A missing archive or a failed extraction aborts this step only; the
//! remaining sub-steps are independent of each other and degrade to
//! warnings. The scratch directory is removed on every return path.

pub mod extract;
pub mod shell;

use std::fs;
use std::path::PathBuf;

use crate::common::fs::{CopyOptions, copy_dir_recursive, install_executable};
use crate::config::layout::ARCHIVE_TOOL;
use crate::context::Context;
use crate::error::{Result, fs::archive_not_found};
use crate::temp::ScratchDir;
use crate::ui::Reporter;

pub use extract::{bundle_root, extract_tar_gz, find_file};

/// Binary location inside the bundle
pub const BINARY_ENTRY: &str = "bin/jira";

/// Shell-integration script inside the bundle
pub const SHELL_ENTRY: &str = "shell/jira.sh";

/// Supplementary assets inside the bundle
pub const ASSETS_ENTRY: &str = "share";

/// Top-level directories of an unwrapped bundle
const LAYOUT_DIRS: [&str; 3] = ["bin", "shell", ASSETS_ENTRY];

/// What the archive step installed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Installed binary path
    pub binary: Option<PathBuf>,
    /// Whether an existing binary was overwritten
    pub replaced_binary: bool,
    /// Installed shell-integration script
    pub shell_integration: Option<PathBuf>,
    /// Number of supplementary asset files copied
    pub assets: usize,
}

/// Install the archive tool from `ctx.layout.archive`
pub fn install_archive_tool(ctx: &Context<'_>, reporter: &mut Reporter) -> Result<ArchiveSummary> {
    let layout = ctx.layout;
    if !layout.archive.is_file() {
        return Err(archive_not_found(&layout.archive));
    }

    let scratch = ScratchDir::new_in(&layout.scratch_root, "archive")?;
    let extraction = extract_tar_gz(&layout.archive, scratch.path())?;
    for skipped in &extraction.skipped {
        reporter.warn(format!("Skipped unsafe archive entry: {skipped}"));
    }

    let root = bundle_root(scratch.path(), &LAYOUT_DIRS);
    let mut summary = ArchiveSummary::default();

    let binary = root.join(BINARY_ENTRY);
    if binary.is_file() {
        let dest = layout.bin_dir.join(ARCHIVE_TOOL);
        match install_executable(&binary, &dest) {
            Ok(replaced) => {
                if replaced {
                    reporter.warn(format!("Overwrote existing {}", dest.display()));
                }
                reporter.success(&format!("Installed {}", dest.display()));
                summary.binary = Some(dest);
                summary.replaced_binary = replaced;
            }
            Err(e) => reporter.warn(format!("Failed to install {}: {e}", dest.display())),
        }
    } else {
        reporter.warn(format!(
            "Archive has no {BINARY_ENTRY}; skipping {ARCHIVE_TOOL} binary"
        ));
    }

    if let Err(e) = fs::create_dir_all(&layout.tool_config_dir) {
        reporter.warn(format!(
            "Failed to create {}: {e}",
            layout.tool_config_dir.display()
        ));
    } else {
        let assets = root.join(ASSETS_ENTRY);
        if assets.is_dir() {
            match copy_dir_recursive(&assets, &layout.tool_config_dir, &CopyOptions::default()) {
                Ok(n) => summary.assets = n,
                Err(e) => reporter.warn(format!("Failed to copy {ARCHIVE_TOOL} assets: {e}")),
            }
        }
    }

    let script = root.join(SHELL_ENTRY);
    if script.is_file() {
        match shell::install_integration(&script, &layout.shell_dirs) {
            Ok(installed) => {
                reporter.success(&format!("Installed {}", installed.display()));
                let dir = installed.parent().map(PathBuf::from).unwrap_or_default();
                if !shell::is_sourced(&layout.shell_profiles, &dir, &layout.home) {
                    reporter.warn(format!(
                        "No shell profile sources {}; add it to your ~/.zshrc or ~/.bashrc",
                        dir.display()
                    ));
                }
                summary.shell_integration = Some(installed);
            }
            Err(e) => reporter.warn(format!("Failed to install shell integration: {e}")),
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::extract::test_support::write_tar_gz;
    use super::*;
    use crate::config::{Layout, Manifest};
    use crate::error::DevbootError;
    use crate::process::fake::FakeHost;
    use serial_test::serial;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        layout: Layout,
        manifest: Manifest,
        host: FakeHost,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let manifest = Manifest::default();
            let scratch = temp.path().join("scratch");
            fs::create_dir_all(&scratch).unwrap();
            let layout = Layout::for_home(
                &temp.path().join("src"),
                &temp.path().join("home"),
                &manifest,
            )
            .with_scratch_root(scratch);
            fs::create_dir_all(layout.archive.parent().unwrap()).unwrap();
            Self {
                _temp: temp,
                layout,
                manifest,
                host: FakeHost::new(),
            }
        }

        fn ctx(&self) -> Context<'_> {
            Context {
                layout: &self.layout,
                manifest: &self.manifest,
                runner: &self.host,
                probe: &self.host,
            }
        }

        fn scratch_entries(&self) -> usize {
            fs::read_dir(&self.layout.scratch_root).unwrap().count()
        }
    }

    #[test]
    #[serial]
    fn test_missing_archive_is_not_found() {
        let fx = Fixture::new();
        let mut reporter = Reporter::silent();
        let err = install_archive_tool(&fx.ctx(), &mut reporter).unwrap_err();
        assert!(matches!(err, DevbootError::ArchiveNotFound { .. }));
        assert_eq!(fx.scratch_entries(), 0);
    }

    #[test]
    #[serial]
    fn test_full_install() {
        let fx = Fixture::new();
        write_tar_gz(
            &fx.layout.archive,
            &[
                ("jira-cli/bin/jira", "#!/bin/sh\necho jira\n"),
                ("jira-cli/shell/jira.sh", "alias jt='jira issue list'\n"),
                ("jira-cli/share/templates/bug.md", "# Bug\n"),
            ],
        );
        let mut reporter = Reporter::silent();

        let summary = install_archive_tool(&fx.ctx(), &mut reporter).unwrap();

        assert_eq!(summary.binary, Some(fx.layout.bin_dir.join("jira")));
        assert!(!summary.replaced_binary);
        assert_eq!(summary.assets, 1);
        assert!(fx.layout.tool_config_dir.join("templates/bug.md").is_file());
        assert_eq!(
            summary.shell_integration,
            Some(fx.layout.shell_dirs[0].join("jira.sh"))
        );
        // No profile sources the integration dir yet
        assert_eq!(reporter.warnings().len(), 1);
        assert!(reporter.warnings()[0].contains("No shell profile sources"));
        assert_eq!(fx.scratch_entries(), 0);
    }

    #[test]
    #[serial]
    fn test_overwrite_warns() {
        let fx = Fixture::new();
        write_tar_gz(&fx.layout.archive, &[("bin/jira", "new")]);
        fs::create_dir_all(&fx.layout.bin_dir).unwrap();
        fs::write(fx.layout.bin_dir.join("jira"), "old").unwrap();
        let mut reporter = Reporter::silent();

        let summary = install_archive_tool(&fx.ctx(), &mut reporter).unwrap();

        assert!(summary.replaced_binary);
        assert_eq!(fs::read_to_string(fx.layout.bin_dir.join("jira")).unwrap(), "new");
        assert!(reporter.warnings().iter().any(|w| w.contains("Overwrote")));
    }

    #[test]
    #[serial]
    fn test_missing_binary_still_runs_other_substeps() {
        let fx = Fixture::new();
        write_tar_gz(&fx.layout.archive, &[("shell/jira.sh", "# integration\n")]);
        fs::create_dir_all(&fx.layout.home).unwrap();
        fs::write(
            fx.layout.home.join(".zshrc"),
            "for f in ~/.config/shell/*.sh; do source $f; done\n",
        )
        .unwrap();
        let mut reporter = Reporter::silent();

        let summary = install_archive_tool(&fx.ctx(), &mut reporter).unwrap();

        assert!(summary.binary.is_none());
        assert!(fx.layout.tool_config_dir.is_dir());
        assert!(summary.shell_integration.is_some());
        assert_eq!(reporter.warnings().len(), 1);
        assert!(reporter.warnings()[0].contains("bin/jira"));
        assert_eq!(fx.scratch_entries(), 0);
    }

    #[test]
    #[serial]
    fn test_existing_integration_dir_preferred() {
        let fx = Fixture::new();
        write_tar_gz(&fx.layout.archive, &[("shell/jira.sh", "")]);
        fs::create_dir_all(&fx.layout.shell_dirs[2]).unwrap();
        let mut reporter = Reporter::silent();

        let summary = install_archive_tool(&fx.ctx(), &mut reporter).unwrap();

        assert_eq!(
            summary.shell_integration,
            Some(fx.layout.shell_dirs[2].join("jira.sh"))
        );
        assert!(!fx.layout.shell_dirs[0].exists());
    }

    #[test]
    #[serial]
    fn test_extraction_failure_is_step_fatal_and_cleans_scratch() {
        let fx = Fixture::new();
        fs::write(&fx.layout.archive, "corrupt").unwrap();
        let mut reporter = Reporter::silent();

        let err = install_archive_tool(&fx.ctx(), &mut reporter).unwrap_err();

        assert!(matches!(err, DevbootError::ArchiveExtractFailed { .. }));
        assert!(!fx.layout.bin_dir.join("jira").exists());
        assert_eq!(fx.scratch_entries(), 0);
    }
}
