//! High-level operations
//!
//! An operation strings the individual stages together and owns the run
//! policy: which errors halt, which degrade to warnings.

pub mod provision;

pub use provision::{ProvisionOperation, ProvisionOptions, RunReport, Stage, StageStatus};
