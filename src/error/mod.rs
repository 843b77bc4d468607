//! Error types and handling for devboot
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only fatal conditions are represented here. Step-fatal and recoverable
//! conditions are converted into warnings by the stage that hit them.
//!
//! Constructor helpers are grouped by error domain:
//! - [`platform`]: Platform detection and package-manager preconditions
//! - [`process`]: External command execution
//! - [`git`]: Plugin-manager clone
//! - [`fs`]: File system and configuration tree errors

pub mod fs;
pub mod git;
pub mod platform;
pub mod process;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for devboot operations
#[derive(Error, Diagnostic, Debug)]
pub enum DevbootError {
    // Platform errors
    #[error("Unsupported platform: {platform}")]
    #[diagnostic(
        code(devboot::platform::unsupported),
        help("devboot supports macOS (Homebrew) and Debian-family Linux (apt)")
    )]
    UnsupportedPlatform { platform: String },

    #[error("Missing required tools: {tools}")]
    #[diagnostic(
        code(devboot::platform::missing_prerequisites),
        help("Install them manually, or re-run with --skip-deps")
    )]
    MissingPrerequisites { tools: String },

    #[error("Package manager precondition '{step}' failed: {reason}")]
    #[diagnostic(code(devboot::platform::precondition_failed))]
    PreconditionFailed { step: String, reason: String },

    // Process errors
    #[error("Command failed: {command}: {reason}")]
    #[diagnostic(code(devboot::process::command_failed))]
    CommandFailed { command: String, reason: String },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(devboot::git::clone_failed),
        help("Check your network connection; the editor configuration needs the plugin manager")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(devboot::git::operation_failed))]
    GitOperationFailed { message: String },

    // Archive errors
    #[error("Archive not found: {path}")]
    #[diagnostic(code(devboot::archive::not_found))]
    ArchiveNotFound { path: String },

    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(code(devboot::archive::extract_failed))]
    ArchiveExtractFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration source tree not found: {path}")]
    #[diagnostic(
        code(devboot::config::source_missing),
        help("Run devboot from the dotfiles checkout, or pass --source-dir")
    )]
    ConfigSourceMissing { path: String },

    #[error("Configuration source {source_dir} and target {target} overlap")]
    #[diagnostic(
        code(devboot::config::overlap),
        help("Keep the dotfiles checkout outside the editor configuration directory")
    )]
    ConfigOverlap { source_dir: String, target: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(devboot::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(devboot::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Could not determine the home directory")]
    #[diagnostic(code(devboot::config::no_home), help("Set the HOME environment variable"))]
    HomeDirNotFound,

    // File system errors
    #[error("Failed to back up {path}: {reason}")]
    #[diagnostic(code(devboot::fs::backup_failed))]
    BackupFailed { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    #[diagnostic(code(devboot::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(devboot::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DevbootError {
    fn from(err: std::io::Error) -> Self {
        DevbootError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DevbootError {
    fn from(err: serde_yaml::Error) -> Self {
        DevbootError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for DevbootError {
    fn from(err: git2::Error) -> Self {
        DevbootError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DevbootError>;
