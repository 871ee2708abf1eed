//! Marketplace aggregation
//!
//! Fans out one lookup per identifier across both marketplaces, waits for all
//! of them, and normalizes each native record into an [`AppRecord`].
//!
//! Results are collected by index, so the output order only depends on the
//! input order: every App Store record comes first (in input order), then
//! every Google Play record. A single failing lookup fails the whole run.

use futures::future::try_join_all;

use crate::domain::{AppRecord, Icon, Source, display_name};
use crate::error::Result;
use crate::marketplace::{
    AppStoreLookup, MarketplaceRecord, PlayStoreLookup, classify_identifier,
};

/// Look up every id of both lists concurrently and normalize the results
pub async fn aggregate<A, P>(
    app_store: &A,
    play_store: &P,
    app_store_ids: &[String],
    play_store_ids: &[String],
) -> Result<Vec<AppRecord>>
where
    A: AppStoreLookup,
    P: PlayStoreLookup,
{
    tracing::info!(
        app_store = app_store_ids.len(),
        play_store = play_store_ids.len(),
        "fetching apps data"
    );

    let app_store_lookups = app_store_ids.iter().map(|id| async move {
        app_store.app(id).await.map(MarketplaceRecord::AppStore)
    });
    let play_store_lookups = play_store_ids.iter().map(|id| async move {
        play_store.app(id).await.map(MarketplaceRecord::PlayStore)
    });

    let (app_store_apps, play_store_apps) = futures::try_join!(
        try_join_all(app_store_lookups),
        try_join_all(play_store_lookups)
    )?;

    Ok(app_store_apps
        .into_iter()
        .chain(play_store_apps)
        .map(normalize)
        .inspect(|app| {
            tracing::debug!(
                id = %app.id,
                source = %app.source,
                name = %app.name,
                rating = ?app.rating,
                rating_count = ?app.rating_count,
                installs = ?app.installs,
                category = ?app.category,
                "got app"
            );
        })
        .collect())
}

/// Same as [`aggregate`], for a single list mixing both kinds of ids
///
/// Each id is routed with [`classify_identifier`].
pub async fn aggregate_combined<A, P>(
    app_store: &A,
    play_store: &P,
    ids: &[String],
) -> Result<Vec<AppRecord>>
where
    A: AppStoreLookup,
    P: PlayStoreLookup,
{
    let (app_store_ids, play_store_ids) = split_by_marketplace(ids);
    aggregate(app_store, play_store, &app_store_ids, &play_store_ids).await
}

/// Split a mixed id list into (App Store ids, Google Play ids), keeping order
pub fn split_by_marketplace(ids: &[String]) -> (Vec<String>, Vec<String>) {
    ids.iter()
        .cloned()
        .partition(|id| classify_identifier(id) == Source::AppStore)
}

/// Map a native marketplace record onto the unified shape
pub fn normalize(record: MarketplaceRecord) -> AppRecord {
    let source = record.source();
    match record {
        MarketplaceRecord::AppStore(app) => AppRecord {
            id: app.id.to_string(),
            name: display_name(&app.title),
            icon: Icon::Remote(app.icon),
            rating: app.score,
            installs: None,
            url: app.url,
            source,
            category: app.primary_genre,
            rating_count: app.ratings,
        },
        MarketplaceRecord::PlayStore(app) => AppRecord {
            id: app.app_id,
            name: display_name(&app.title),
            icon: Icon::Remote(app.icon),
            rating: app.score_text.as_deref().and_then(parse_score),
            installs: app.installs,
            url: app.url,
            source,
            category: app.genre,
            rating_count: None,
        },
    }
}

/// Parse pre-formatted score text; anything that isn't a finite number is no rating
fn parse_score(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|score| score.is_finite())
}
