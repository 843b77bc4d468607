//! Host platform support
//!
//! The platform is detected once at start-up and passed by value into every
//! later stage. Each supported platform maps to exactly one package manager.

pub mod detection;
pub mod package_manager;

use std::fmt;

pub use detection::{PlatformSignals, detect};
pub use package_manager::{Apt, Homebrew, PackageManager};

use crate::process::CommandProbe;

/// Supported host platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    DebianFamily,
}

impl Platform {
    /// Stable identifier, also accepted by `DEVBOOT_PLATFORM`
    pub fn id(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::DebianFamily => "debian",
        }
    }

    /// Package manager used to install dependencies on this platform
    pub fn package_manager(self, probe: &dyn CommandProbe) -> Box<dyn PackageManager> {
        match self {
            Platform::MacOs => Box::new(Homebrew),
            Platform::DebianFamily => Box::new(Apt::for_host(probe)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::DebianFamily => write!(f, "Debian-family Linux"),
        }
    }
}
