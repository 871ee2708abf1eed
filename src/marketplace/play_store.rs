//! Google Play lookups by scraping the public details page
//!
//! Google Play has no public lookup API. The details page carries the fields
//! we need in stable `itemprop` attributes and Open Graph meta tags, with the
//! install-count bucket sitting right before its "Downloads" label.

use scraper::{ElementRef, Html, Selector};

use super::{PlayStoreApp, PlayStoreLookup};
use crate::domain::Source;
use crate::error::{FeedError, Result};

const DETAILS_URL: &str = "https://play.google.com/store/apps/details";
const OG_TITLE_SUFFIX: &str = " - Apps on Google Play";

/// Google Play client bound to one language and country
#[derive(Debug, Clone)]
pub struct PlayStoreClient {
    http: reqwest::Client,
    lang: String,
    country: String,
}

impl PlayStoreClient {
    pub fn new(http: reqwest::Client, lang: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            http,
            lang: lang.into(),
            country: country.into(),
        }
    }

    /// Storefront URL for `app_id`, also used as the badge link
    pub fn details_url(&self, app_id: &str) -> Result<String> {
        reqwest::Url::parse_with_params(
            DETAILS_URL,
            [
                ("id", app_id),
                ("hl", self.lang.as_str()),
                ("gl", self.country.as_str()),
            ],
        )
        .map(String::from)
        .map_err(|e| lookup_failed(app_id, e))
    }
}

impl PlayStoreLookup for PlayStoreClient {
    async fn app(&self, id: &str) -> Result<PlayStoreApp> {
        let url = self.details_url(id)?;
        tracing::debug!(id, %url, "looking up Google Play app");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| lookup_failed(id, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FeedError::AppNotFound {
                store: Source::PlayStore.to_string(),
                id: id.to_string(),
            });
        }

        let body = response
            .error_for_status()
            .map_err(|e| lookup_failed(id, e))?
            .text()
            .await
            .map_err(|e| lookup_failed(id, e))?;

        parse_details_page(id, &url, &body)
    }
}

fn lookup_failed(id: &str, reason: impl ToString) -> FeedError {
    FeedError::LookupFailed {
        store: Source::PlayStore.to_string(),
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_failed(id: &str, reason: impl Into<String>) -> FeedError {
    FeedError::ParseFailed {
        store: Source::PlayStore.to_string(),
        id: id.to_string(),
        reason: reason.into(),
    }
}

fn selector(id: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| parse_failed(id, format!("invalid selector {css}: {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, id: &str, css: &str) -> Result<Option<String>> {
    let sel = selector(id, css)?;
    Ok(document
        .select(&sel)
        .map(element_text)
        .find(|text| !text.is_empty()))
}

fn first_attr(document: &Html, id: &str, css: &str, attr: &str) -> Result<Option<String>> {
    let sel = selector(id, css)?;
    Ok(document
        .select(&sel)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string))
}

/// Leading decimal number of a text such as "4.5star" or "4,5 Sterne"
///
/// A decimal comma is returned as a point.
fn leading_number(text: &str) -> Option<String> {
    let number: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    (!number.is_empty()).then_some(number)
}

/// Text of the element right before the "Downloads" label
fn installs_bucket(document: &Html, id: &str) -> Result<Option<String>> {
    let sel = selector(id, "div")?;
    for label in document.select(&sel) {
        if element_text(label) != "Downloads" {
            continue;
        }
        let bucket = label
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .map(element_text)
            .filter(|text| !text.is_empty());
        if bucket.is_some() {
            return Ok(bucket);
        }
    }
    Ok(None)
}

/// Parse a Google Play details page into the record for `app_id`
///
/// `url` is the storefront page the HTML was fetched from.
pub fn parse_details_page(app_id: &str, url: &str, html: &str) -> Result<PlayStoreApp> {
    let document = Html::parse_document(html);

    let title = match first_text(&document, app_id, r#"h1[itemprop="name"]"#)? {
        Some(title) => Some(title),
        None => first_attr(&document, app_id, r#"meta[property="og:title"]"#, "content")?
            .map(|t| t.trim_end_matches(OG_TITLE_SUFFIX).to_string()),
    }
    .ok_or_else(|| parse_failed(app_id, "page has no app title"))?;

    let icon = match first_attr(&document, app_id, r#"img[alt="Icon image"]"#, "src")? {
        Some(icon) => Some(icon),
        None => match first_attr(&document, app_id, r#"img[itemprop="image"]"#, "src")? {
            Some(icon) => Some(icon),
            None => first_attr(&document, app_id, r#"meta[property="og:image"]"#, "content")?,
        },
    }
    .ok_or_else(|| parse_failed(app_id, "page has no app icon"))?;

    let score_text = first_text(&document, app_id, r#"[itemprop="starRating"]"#)?
        .as_deref()
        .and_then(leading_number);

    let installs = installs_bucket(&document, app_id)?;
    let genre = first_text(&document, app_id, r#"[itemprop="genre"]"#)?;

    Ok(PlayStoreApp {
        app_id: app_id.to_string(),
        title,
        icon,
        score_text,
        installs,
        url: url.to_string(),
        genre,
    })
}
