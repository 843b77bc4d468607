//! External command errors

use super::DevbootError;

pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> DevbootError {
    DevbootError::CommandFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
