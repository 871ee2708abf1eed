//! Feed block in a README
//!
//! Replaces whatever sits between the feed markers with one linked badge per
//! app, leaving the rest of the file untouched.

use std::fs;
use std::path::Path;

use crate::domain::AppRecord;
use crate::error::{FeedError, Result};

const TAG: &str = "<!-- APPSTORES-FEED:";
const CLOSING: &str = "-->";

/// Markdown lines linking each badge to its storefront page
pub fn feed_block(apps: &[AppRecord], svg_dir: &str) -> String {
    let svg_dir = svg_dir.trim_end_matches('/');
    apps.iter()
        .map(|app| {
            format!(
                "[![{}]({svg_dir}/{})]({})",
                app.name.replace(['[', ']'], ""),
                app.file_name(),
                app.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Put `block` between the START and END markers of `previous`
///
/// Returns `None` when either marker is missing.
pub fn splice_feed(previous: &str, block: &str) -> Option<String> {
    let start = previous.find(&format!("{TAG}START"))?;
    let start_end = start + previous[start..].find(CLOSING)? + CLOSING.len();
    let end = start_end + previous[start_end..].find(&format!("{TAG}END"))?;

    Some(format!(
        "{}\n{block}\n{}",
        &previous[..start_end],
        &previous[end..]
    ))
}

/// Rewrite the feed block of the file at `path`
///
/// Returns whether the file content changed.
pub fn update_readme(path: &Path, apps: &[AppRecord], svg_dir: &str) -> Result<bool> {
    let previous = fs::read_to_string(path).map_err(|e| FeedError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let updated = splice_feed(&previous, &feed_block(apps, svg_dir)).ok_or_else(|| {
        FeedError::ReadmeMarkersMissing {
            path: path.display().to_string(),
        }
    })?;

    if updated == previous {
        tracing::info!(path = %path.display(), "no change in feed block");
        return Ok(false);
    }

    tracing::info!(path = %path.display(), "writing feed block");
    fs::write(path, updated).map_err(|e| FeedError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}
