//! Git operation errors

use super::DevbootError;

pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> DevbootError {
    DevbootError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}
