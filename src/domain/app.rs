//! App domain types
//!
//! [`AppRecord`] is the marketplace-agnostic shape every lookup is normalized
//! into, and the only input the badge renderer knows about.

use std::fmt;

/// Marketplace an app was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Apple App Store, numeric identifiers
    AppStore,
    /// Google Play, dotted package names
    PlayStore,
}

impl Source {
    /// Human readable marketplace name, used in logs and errors
    pub fn display_name(self) -> &'static str {
        match self {
            Source::AppStore => "App Store",
            Source::PlayStore => "Google Play",
        }
    }

    /// Whether this marketplace reports an install-count bucket
    pub fn reports_installs(self) -> bool {
        matches!(self, Source::PlayStore)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// App icon, either still hosted by the marketplace or embedded as a `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Remote(String),
    Inline(String),
}

/// Unified display metadata for one app
#[derive(Debug, Clone, PartialEq)]
pub struct AppRecord {
    /// Marketplace identifier, also the output file stem
    pub id: String,
    /// Display title, trimmed with newlines replaced by spaces
    pub name: String,
    pub icon: Icon,
    /// Average rating, `None` when the marketplace reports none
    pub rating: Option<f64>,
    /// Install-count bucket (e.g. "1,000,000+"), Google Play only
    pub installs: Option<String>,
    /// Storefront page
    pub url: String,
    pub source: Source,
    /// Primary genre; left empty when the marketplace omits it
    pub category: Option<String>,
    /// Number of ratings, App Store only
    pub rating_count: Option<u64>,
}

impl AppRecord {
    /// Output file name for this record's badge
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.id)
    }
}

/// Trim a title and replace each line break (`\r\n`, `\n` or `\r`) with one space
pub fn display_name(raw: &str) -> String {
    raw.trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
