//! Error types and handling for appstores-feed
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every failure in the pipeline ends up as one [`FeedError`] returned to
//! `main`, which logs it once and exits non-zero.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for appstores-feed operations
#[derive(Error, Diagnostic, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("No app ids to retrieve")]
    #[diagnostic(
        code(appstores_feed::config::no_app_ids),
        help("Set --appstore-ids, --playstore-ids or --app-ids (or the matching INPUT_* variables)")
    )]
    NoAppIds,

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(appstores_feed::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(appstores_feed::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(appstores_feed::config::invalid))]
    ConfigInvalid { message: String },

    // Marketplace errors
    #[error("Failed to look up '{id}' on {store}: {reason}")]
    #[diagnostic(
        code(appstores_feed::marketplace::lookup_failed),
        help("Check your network connection and that the marketplace is reachable")
    )]
    LookupFailed {
        store: String,
        id: String,
        reason: String,
    },

    #[error("App '{id}' not found on {store}")]
    #[diagnostic(
        code(appstores_feed::marketplace::not_found),
        help("App Store ids are numeric (e.g. 284882215), Google Play ids are package names")
    )]
    AppNotFound { store: String, id: String },

    #[error("Failed to parse {store} response for '{id}': {reason}")]
    #[diagnostic(code(appstores_feed::marketplace::parse_failed))]
    ParseFailed {
        store: String,
        id: String,
        reason: String,
    },

    #[error("Couldn't retrieve any apps for the specified ids")]
    #[diagnostic(code(appstores_feed::marketplace::no_apps))]
    NoAppsRetrieved,

    // Icon and render errors
    #[error("Failed to fetch icon {url}: {reason}")]
    #[diagnostic(code(appstores_feed::icon::fetch_failed))]
    IconFetchFailed { url: String, reason: String },

    #[error("Icon for '{id}' has not been inlined")]
    #[diagnostic(code(appstores_feed::render::icon_not_inlined))]
    IconNotInlined { id: String },

    // File system errors
    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(appstores_feed::fs::dir_create_failed))]
    DirCreateFailed { path: String, reason: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(appstores_feed::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(appstores_feed::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Cannot find the feed markers in {path}")]
    #[diagnostic(
        code(appstores_feed::readme::markers_missing),
        help("Add <!-- APPSTORES-FEED:START --> and <!-- APPSTORES-FEED:END --> to the file")
    )]
    ReadmeMarkersMissing { path: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(appstores_feed::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Not in a git repository")]
    #[diagnostic(
        code(appstores_feed::git::not_in_repo),
        help("Run the action from a checked out repository (actions/checkout)")
    )]
    NotInGitRepository,

    #[error("Cannot fast-forward branch '{branch}' to origin")]
    #[diagnostic(
        code(appstores_feed::git::not_fast_forward),
        help("The remote branch has diverged; re-run the workflow on the latest commit")
    )]
    NotFastForward { branch: String },

    #[error("Push of '{refname}' was rejected: {reason}")]
    #[diagnostic(code(appstores_feed::git::push_rejected))]
    PushRejected { refname: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(appstores_feed::io))]
    IoError { message: String },
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for FeedError {
    fn from(err: git2::Error) -> Self {
        FeedError::GitOperationFailed {
            message: crate::git::interpret_git_error(&err),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FeedError>;
