//! Shared inputs of a provisioning run

use crate::config::{Layout, Manifest};
use crate::process::{CommandProbe, CommandRunner};

/// Everything a stage needs besides the detected platform and the reporter
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub layout: &'a Layout,
    pub manifest: &'a Manifest,
    pub runner: &'a dyn CommandRunner,
    pub probe: &'a dyn CommandProbe,
}
