//! Common test utilities for devboot integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// An isolated home directory plus a dotfiles source tree
#[allow(dead_code)]
pub struct TestEnv {
    /// Temporary directory
    pub temp: TempDir,
    /// Fake `$HOME`
    pub home: PathBuf,
    /// Source root passed to devboot
    pub source: PathBuf,
    /// `TMPDIR` for the child, so leftover scratch dirs can be counted
    pub tmp: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let source = temp.path().join("dotfiles");
        let tmp = temp.path().join("tmp");
        for dir in [&home, &source, &tmp] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }
        Self {
            temp,
            home,
            source,
            tmp,
        }
    }

    /// Source tree with an entry point and one supporting module
    pub fn with_config_source(self) -> Self {
        self.write_source("nvim/init.lua", "require('config')\n");
        self.write_source("nvim/lua/config/init.lua", "vim.g.mapleader = ' '\n");
        self
    }

    pub fn write_source(&self, rel: &str, content: &str) {
        write_file(&self.source.join(rel), content);
    }

    pub fn write_home(&self, rel: &str, content: &str) {
        write_file(&self.home.join(rel), content);
    }

    pub fn config_target(&self) -> PathBuf {
        self.home.join(".config/nvim")
    }

    /// Sibling backups of the config target
    pub fn backups(&self) -> Vec<PathBuf> {
        let parent = self.home.join(".config");
        let Ok(entries) = fs::read_dir(&parent) else {
            return Vec::new();
        };
        let mut backups: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("nvim.backup."))
            .map(|e| e.path())
            .collect();
        backups.sort();
        backups
    }

    pub fn scratch_dirs(&self) -> usize {
        fs::read_dir(&self.tmp)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|e| e.file_name().to_string_lossy().starts_with("devboot-"))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Gzip tarball at the default archive location
    pub fn write_archive(&self, entries: &[(&str, &str)]) {
        let path = self.source.join("assets/jira-cli.tar.gz");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = fs::File::create(&path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    /// devboot with every user-level location redirected into the temp dir
    pub fn devboot_cmd(&self) -> Command {
        let mut cmd = devboot_cmd();
        cmd.current_dir(&self.source)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("XDG_DATA_HOME", self.home.join(".local/share"))
            .env("TMPDIR", &self.tmp)
            .env("DEVBOOT_PLATFORM", "macos")
            .env_remove("DEVBOOT_SOURCE_DIR")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn devboot_cmd() -> Command {
    Command::cargo_bin("devboot").unwrap()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}
