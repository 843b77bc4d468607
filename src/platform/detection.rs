//! Platform detection from OS identification signals

use std::env;

use os_info::Type;

use super::Platform;
use crate::error::{Result, platform::unsupported};

/// Environment variable that replaces OS signal inspection
pub const PLATFORM_OVERRIDE_VAR: &str = "DEVBOOT_PLATFORM";

/// Raw OS identification signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSignals {
    /// Operating system type reported by `os_info`
    pub os_type: Type,
    /// Value of `DEVBOOT_PLATFORM`, when set
    pub forced: Option<String>,
}

impl PlatformSignals {
    /// Signals for a known OS type with no override
    pub fn of(os_type: Type) -> Self {
        Self {
            os_type,
            forced: None,
        }
    }

    /// Collect the signals of the running host
    pub fn from_host() -> Self {
        Self {
            os_type: os_info::get().os_type(),
            forced: env::var(PLATFORM_OVERRIDE_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Determine the platform. Anything that is neither macOS nor a Debian-family
/// Linux is an unsupported-platform error.
pub fn detect(signals: &PlatformSignals) -> Result<Platform> {
    if let Some(forced) = &signals.forced {
        return match forced.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::MacOs),
            "debian" | "ubuntu" => Ok(Platform::DebianFamily),
            other => Err(unsupported(other)),
        };
    }

    match signals.os_type {
        Type::Macos => Ok(Platform::MacOs),
        Type::Debian | Type::Ubuntu | Type::Mint | Type::Pop | Type::Raspbian => {
            Ok(Platform::DebianFamily)
        }
        other => Err(unsupported(other.to_string())),
    }
}
