//! App Store lookups through the iTunes lookup API

use serde::Deserialize;

use super::{AppStoreApp, AppStoreLookup};
use crate::domain::Source;
use crate::error::{FeedError, Result};

const LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// App Store client bound to one storefront country
#[derive(Debug, Clone)]
pub struct AppStoreClient {
    http: reqwest::Client,
    country: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    result_count: u32,
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    track_id: u64,
    track_name: String,
    artwork_url512: Option<String>,
    artwork_url100: Option<String>,
    artwork_url60: Option<String>,
    average_user_rating: Option<f64>,
    user_rating_count: Option<u64>,
    track_view_url: String,
    primary_genre_name: Option<String>,
}

impl AppStoreClient {
    pub fn new(http: reqwest::Client, country: impl Into<String>) -> Self {
        Self {
            http,
            country: country.into(),
        }
    }

    fn lookup_failed(id: &str, reason: impl ToString) -> FeedError {
        FeedError::LookupFailed {
            store: Source::AppStore.to_string(),
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl AppStoreLookup for AppStoreClient {
    async fn app(&self, id: &str) -> Result<AppStoreApp> {
        tracing::debug!(id, country = %self.country, "looking up App Store app");
        let response = self
            .http
            .get(LOOKUP_URL)
            .query(&[
                ("id", id),
                ("country", self.country.as_str()),
                ("entity", "software"),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Self::lookup_failed(id, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| Self::lookup_failed(id, e))?;
        parse_lookup(id, &body)
    }
}

/// Parse an iTunes lookup response body into the App Store record for `id`
pub fn parse_lookup(id: &str, body: &str) -> Result<AppStoreApp> {
    let response: LookupResponse =
        serde_json::from_str(body).map_err(|e| FeedError::ParseFailed {
            store: Source::AppStore.to_string(),
            id: id.to_string(),
            reason: e.to_string(),
        })?;

    if response.result_count == 0 {
        return Err(FeedError::AppNotFound {
            store: Source::AppStore.to_string(),
            id: id.to_string(),
        });
    }

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::AppNotFound {
            store: Source::AppStore.to_string(),
            id: id.to_string(),
        })?;

    let icon = result
        .artwork_url512
        .or(result.artwork_url100)
        .or(result.artwork_url60)
        .ok_or_else(|| FeedError::ParseFailed {
            store: Source::AppStore.to_string(),
            id: id.to_string(),
            reason: "response has no artwork URL".to_string(),
        })?;

    Ok(AppStoreApp {
        id: result.track_id,
        title: result.track_name,
        icon,
        score: result.average_user_rating,
        ratings: result.user_rating_count,
        url: result.track_view_url,
        primary_genre: result.primary_genre_name,
    })
}
