//! Command implementations for devboot CLI

pub mod provision;
