//! Platform errors

use super::DevbootError;

/// Creates an unsupported-platform error
pub fn unsupported(platform: impl Into<String>) -> DevbootError {
    DevbootError::UnsupportedPlatform {
        platform: platform.into(),
    }
}

/// Creates a missing-prerequisites error listing every missing tool
pub fn missing_prerequisites(tools: &[&str]) -> DevbootError {
    DevbootError::MissingPrerequisites {
        tools: tools.join(", "),
    }
}

/// Creates a precondition-step failure
pub fn precondition_failed(step: impl Into<String>, reason: impl Into<String>) -> DevbootError {
    DevbootError::PreconditionFailed {
        step: step.into(),
        reason: reason.into(),
    }
}
