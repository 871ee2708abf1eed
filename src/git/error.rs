//! Git error handling
//!
//! Turns libgit2 errors into short messages that point at the likely cause
//! when publishing from a CI runner.

use git2::{Error, ErrorClass, ErrorCode};

type Rule = (fn(&str, ErrorClass) -> bool, &'static str);

const RULES: &[Rule] = &[
    (
        |msg, _| msg.contains("not found") || msg.contains("404"),
        "Repository not found",
    ),
    (
        |msg, _| {
            msg.contains("authentication")
                || msg.contains("credentials")
                || msg.contains("401")
                || msg.contains("403")
        },
        "Authentication failed (check the access token and its permissions)",
    ),
    (
        |msg, _| msg.contains("permission denied") || msg.contains("access denied"),
        "Permission denied",
    ),
    (
        |msg, _| {
            msg.contains("connection")
                || msg.contains("network")
                || msg.contains("timed out")
                || msg.contains("timeout")
        },
        "Network error",
    ),
    (
        |msg, class| class == ErrorClass::Http && msg.contains("certificate"),
        "Certificate error",
    ),
];

/// Interpret a git2 error and provide a more user-friendly message
pub fn interpret_git_error(err: &Error) -> String {
    if err.code() == ErrorCode::NotFastForward {
        return "Remote branch has diverged (not a fast-forward)".to_string();
    }

    let message = err.message().to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(&message, err.class()))
        .map_or_else(
            || err.message().to_string(),
            |(_, friendly)| format!("{friendly}: {}", err.message()),
        )
}
