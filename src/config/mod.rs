//! Configuration handling for devboot
//!
//! This module contains:
//! - `devboot.yaml` - Optional provisioning manifest in the source checkout
//! - [`Layout`] - Every filesystem location the run reads or writes, resolved once

pub mod layout;
pub mod manifest;

pub use layout::Layout;
pub use manifest::{Manifest, PluginManagerSource};
