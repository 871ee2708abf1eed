//! Icon inlining
//!
//! Replaces each record's remote icon URL with a `data:` URI holding the same
//! bytes, so rendered badges have no external dependencies.

use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;

use crate::domain::{AppRecord, Icon};
use crate::error::{FeedError, Result};

/// Content type used when the icon response doesn't declare one
const FALLBACK_CONTENT_TYPE: &str = "image/png";

/// Raw icon bytes and the content type the server reported
#[derive(Debug, Clone)]
pub struct FetchedIcon {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Downloads icon images
pub trait IconFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedIcon>>;
}

/// [`IconFetcher`] over plain HTTP GET
#[derive(Debug, Clone)]
pub struct ReqwestIconFetcher {
    http: reqwest::Client,
}

impl ReqwestIconFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl IconFetcher for ReqwestIconFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedIcon> {
        tracing::debug!(url, "getting base64 image from url");
        let fetch_failed = |e: reqwest::Error| FeedError::IconFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_failed)?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let bytes = response.bytes().await.map_err(fetch_failed)?;

        Ok(FetchedIcon {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// `data:<content-type>;base64,<payload>`
pub fn data_uri(content_type: Option<&str>, bytes: &[u8]) -> String {
    let content_type = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_CONTENT_TYPE);
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Fetch every remote icon concurrently and embed it into its record
///
/// Icons that are already inline are left untouched.
pub async fn inline_icons<F: IconFetcher>(fetcher: &F, apps: &mut [AppRecord]) -> Result<()> {
    tracing::info!(count = apps.len(), "getting base64 icons");

    let fetches = apps.iter().map(|app| async move {
        match &app.icon {
            Icon::Remote(url) => fetcher
                .fetch(url)
                .await
                .map(|icon| Some(data_uri(icon.content_type.as_deref(), &icon.bytes))),
            Icon::Inline(_) => Ok(None),
        }
    });
    let inlined = try_join_all(fetches).await?;

    for (app, uri) in apps.iter_mut().zip(inlined) {
        if let Some(uri) = uri {
            app.icon = Icon::Inline(uri);
        }
    }
    Ok(())
}
