//! Marketplace clients
//!
//! This module handles:
//! - The native record shape of each marketplace ([`AppStoreApp`], [`PlayStoreApp`])
//! - The lookup traits the aggregator is generic over
//! - Routing an identifier to its marketplace by shape
//!
//! The HTTP implementations live in [`app_store`] and [`play_store`].

pub mod app_store;
pub mod play_store;

use std::future::Future;

use crate::domain::Source;
use crate::error::Result;

pub use app_store::AppStoreClient;
pub use play_store::PlayStoreClient;

/// User agent sent with every marketplace and icon request
pub const USER_AGENT: &str = concat!("appstores-feed/", env!("CARGO_PKG_VERSION"));

/// App as reported by the App Store
#[derive(Debug, Clone, PartialEq)]
pub struct AppStoreApp {
    pub id: u64,
    pub title: String,
    pub icon: String,
    /// Average user rating, already numeric
    pub score: Option<f64>,
    pub ratings: Option<u64>,
    pub url: String,
    pub primary_genre: Option<String>,
}

/// App as reported by Google Play
#[derive(Debug, Clone, PartialEq)]
pub struct PlayStoreApp {
    pub app_id: String,
    pub title: String,
    pub icon: String,
    /// Pre-formatted rating text (e.g. "4.5")
    pub score_text: Option<String>,
    /// Install-count bucket (e.g. "1,000,000+")
    pub installs: Option<String>,
    pub url: String,
    pub genre: Option<String>,
}

/// Record returned by either marketplace, tagged by origin
#[derive(Debug, Clone, PartialEq)]
pub enum MarketplaceRecord {
    AppStore(AppStoreApp),
    PlayStore(PlayStoreApp),
}

impl MarketplaceRecord {
    pub fn source(&self) -> Source {
        match self {
            MarketplaceRecord::AppStore(_) => Source::AppStore,
            MarketplaceRecord::PlayStore(_) => Source::PlayStore,
        }
    }
}

/// Looks up one app on the App Store
pub trait AppStoreLookup {
    fn app(&self, id: &str) -> impl Future<Output = Result<AppStoreApp>>;
}

/// Looks up one app on Google Play
pub trait PlayStoreLookup {
    fn app(&self, id: &str) -> impl Future<Output = Result<PlayStoreApp>>;
}

/// Route an identifier to its marketplace
///
/// Google Play ids are dotted package names (`com.example.app`), App Store ids
/// are numeric (`284882215`).
pub fn classify_identifier(id: &str) -> Source {
    if id.contains('.') {
        Source::PlayStore
    } else {
        Source::AppStore
    }
}

/// Build the HTTP client shared by the marketplace clients and icon fetcher
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| crate::error::FeedError::ConfigInvalid {
            message: format!("Failed to build HTTP client: {e}"),
        })
}
