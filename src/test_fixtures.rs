//! Test fixtures shared by unit tests
//!
//! In-memory marketplaces and icon fetcher, so pipeline stages can be
//! exercised without network access.
//!
//! ```ignore
//! use crate::test_fixtures::{FakeAppStore, FakePlayStore, ids};
//!
//! let app_store = FakeAppStore::default().with(1, "Foo", Some(4.5));
//! let play_store = FakePlayStore::default().with("com.example.app", "Bar", Some("3.8"));
//! let apps = aggregate(&app_store, &play_store, &ids(&["1"]), &ids(&["com.example.app"])).await?;
//! ```

use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{FeedError, Result};
use crate::inline::{FetchedIcon, IconFetcher};
use crate::marketplace::{AppStoreApp, AppStoreLookup, PlayStoreApp, PlayStoreLookup};

/// Owned id list from string literals
pub fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// App Store answering from a map, counting lookups
#[derive(Default)]
pub struct FakeAppStore {
    pub apps: HashMap<String, AppStoreApp>,
    pub calls: Cell<usize>,
}

impl FakeAppStore {
    /// Add an app whose icon is `http://x/<id>.png`
    pub fn with(mut self, id: u64, title: &str, score: Option<f64>) -> Self {
        self.apps.insert(
            id.to_string(),
            AppStoreApp {
                id,
                title: title.to_string(),
                icon: format!("http://x/{id}.png"),
                score,
                ratings: Some(10),
                url: format!("https://apps.apple.com/us/app/id{id}"),
                primary_genre: None,
            },
        );
        self
    }
}

impl AppStoreLookup for FakeAppStore {
    async fn app(&self, id: &str) -> Result<AppStoreApp> {
        self.calls.set(self.calls.get() + 1);
        self.apps
            .get(id)
            .cloned()
            .ok_or_else(|| FeedError::AppNotFound {
                store: "App Store".to_string(),
                id: id.to_string(),
            })
    }
}

/// Google Play answering from a map, counting lookups
#[derive(Default)]
pub struct FakePlayStore {
    pub apps: HashMap<String, PlayStoreApp>,
    pub calls: Cell<usize>,
}

impl FakePlayStore {
    /// Add an app whose icon is `http://y/<app_id>.png`
    pub fn with(mut self, app_id: &str, title: &str, score_text: Option<&str>) -> Self {
        self.apps.insert(
            app_id.to_string(),
            PlayStoreApp {
                app_id: app_id.to_string(),
                title: title.to_string(),
                icon: format!("http://y/{app_id}.png"),
                score_text: score_text.map(ToString::to_string),
                installs: Some("1,000,000+".to_string()),
                url: format!(
                    "https://play.google.com/store/apps/details?id={app_id}&hl=en&gl=us"
                ),
                genre: Some("Tools".to_string()),
            },
        );
        self
    }
}

impl PlayStoreLookup for FakePlayStore {
    async fn app(&self, id: &str) -> Result<PlayStoreApp> {
        self.calls.set(self.calls.get() + 1);
        self.apps
            .get(id)
            .cloned()
            .ok_or_else(|| FeedError::AppNotFound {
                store: "Google Play".to_string(),
                id: id.to_string(),
            })
    }
}

/// Icon fetcher answering from a map; unknown URLs fail like a 404
#[derive(Default)]
pub struct FakeFetcher {
    pub icons: HashMap<String, FetchedIcon>,
}

impl FakeFetcher {
    pub fn with(mut self, url: &str, bytes: &[u8], content_type: Option<&str>) -> Self {
        self.icons.insert(
            url.to_string(),
            FetchedIcon {
                bytes: bytes.to_vec(),
                content_type: content_type.map(ToString::to_string),
            },
        );
        self
    }
}

impl IconFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedIcon> {
        self.icons
            .get(url)
            .cloned()
            .ok_or_else(|| FeedError::IconFetchFailed {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }
}
