//! Git operations for the plugin-manager checkout
//!
//! This module handles:
//! - Cloning a remote at a branch or tag
//! - Turning libgit2 errors into short, readable reasons

pub mod clone;
mod error;

pub use clone::clone_at;
