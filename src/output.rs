//! Badge persistence
//!
//! Writes one `<id>.svg` per app into the output directory, creating the
//! directory (and its parents) when missing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppRecord;
use crate::error::{FeedError, Result};

/// Write rendered badges, returning the written paths in input order
pub fn write_badges<'a, 'b, I>(dir: &Path, badges: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = (&'a AppRecord, &'b str)>,
{
    fs::create_dir_all(dir).map_err(|e| FeedError::DirCreateFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    badges
        .into_iter()
        .map(|(app, svg)| {
            let path = dir.join(app.file_name());
            tracing::info!(path = %path.display(), "writing badge");
            fs::write(&path, svg).map_err(|e| FeedError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(path)
        })
        .collect()
}
