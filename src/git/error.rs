//! Git error interpretation

use git2::{Error, ErrorClass, ErrorCode};

/// Map substrings of lowercase libgit2 messages to short reasons
const MESSAGE_HINTS: &[(&[&str], &str)] = &[
    (&["not found", "404"], "Repository not found"),
    (&["authentication", "credentials"], "Authentication failed"),
    (&["permission denied", "access denied"], "Permission denied"),
    (
        &["could not resolve host", "failed to resolve address"],
        "Network error: host could not be resolved",
    ),
    (&["timed out", "timeout", "connection"], "Network error"),
    (&["certificate", "ssl"], "TLS error"),
];

/// Interpret a git2 error as a user-facing reason
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();

    if err.code() == ErrorCode::NotFound && err.class() == ErrorClass::Reference {
        return format!("Reference not found: {}", err.message());
    }

    for (needles, hint) in MESSAGE_HINTS {
        if needles.iter().any(|n| message.contains(n)) {
            return format!("{hint} ({})", err.message());
        }
    }

    match err.class() {
        ErrorClass::Http => format!("HTTP error: {}", err.message()),
        ErrorClass::Ssh => format!("SSH error: {}", err.message()),
        _ => err.message().to_string(),
    }
}

/// Whether the error means the requested branch does not exist on the remote
pub fn is_missing_branch(err: &Error) -> bool {
    err.code() == ErrorCode::NotFound
        || err.class() == ErrorClass::Reference
        || err.message().contains("remote branch")
}
