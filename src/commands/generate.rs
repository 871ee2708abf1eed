//! Generate command implementation
//!
//! Runs the whole feed pipeline once: resolve configuration, look up every
//! app, inline the icons, render and write the badges, optionally rewrite
//! the README feed block, then commit and push.

use std::path::{Path, PathBuf};

use console::style;

use crate::aggregate::{aggregate, aggregate_combined};
use crate::cli::GenerateArgs;
use crate::config::{AppIds, FeedConfig};
use crate::domain::AppRecord;
use crate::error::{FeedError, Result};
use crate::git::{self, PublishOutcome};
use crate::inline::{IconFetcher, ReqwestIconFetcher, inline_icons};
use crate::marketplace::{
    AppStoreClient, AppStoreLookup, PlayStoreClient, PlayStoreLookup, http_client,
};
use crate::output::write_badges;
use crate::progress::ProgressDisplay;
use crate::readme::update_readme;
use crate::render::render_badge;

/// Run generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = FeedConfig::from_args(args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let apps = runtime.block_on(fetch_apps(&config))?;

    let written = write_feed(&config, &apps)?;

    let outcome = match &config.publish {
        Some(options) => Some(git::publish(&std::env::current_dir()?, options)?),
        None => {
            tracing::info!("publishing skipped");
            None
        }
    };

    print_summary(&written, outcome.as_ref());
    Ok(())
}

async fn fetch_apps(config: &FeedConfig) -> Result<Vec<AppRecord>> {
    let http = http_client()?;
    let app_store = AppStoreClient::new(http.clone(), config.country.as_str());
    let play_store = PlayStoreClient::new(http.clone(), config.lang.as_str(), config.country.as_str());
    let fetcher = ReqwestIconFetcher::new(http);

    collect_apps(&app_store, &play_store, &fetcher, &config.app_ids).await
}

/// Look up every configured app and inline its icon
pub async fn collect_apps<A, P, F>(
    app_store: &A,
    play_store: &P,
    fetcher: &F,
    ids: &AppIds,
) -> Result<Vec<AppRecord>>
where
    A: AppStoreLookup,
    P: PlayStoreLookup,
    F: IconFetcher,
{
    let mut apps = match ids {
        AppIds::ByMarketplace {
            app_store: app_store_ids,
            play_store: play_store_ids,
        } => aggregate(app_store, play_store, app_store_ids, play_store_ids).await?,
        AppIds::Combined(ids) => aggregate_combined(app_store, play_store, ids).await?,
    };

    if apps.is_empty() {
        return Err(FeedError::NoAppsRetrieved);
    }

    inline_icons(fetcher, &mut apps).await?;
    Ok(apps)
}

/// Render every badge, write them, and update the README when configured
pub fn write_feed(config: &FeedConfig, apps: &[AppRecord]) -> Result<Vec<PathBuf>> {
    let progress = ProgressDisplay::new(apps.len() as u64);
    let badges = match render_all(apps, &progress) {
        Ok(badges) => badges,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };
    progress.finish();

    let written = write_badges(
        &config.svg_path,
        apps.iter().zip(badges.iter().map(String::as_str)),
    )?;

    if let Some(readme) = &config.readme {
        let svg_dir = svg_dir_for_readme(readme, &config.svg_path);
        update_readme(readme, apps, &svg_dir)?;
    }

    Ok(written)
}

fn render_all(apps: &[AppRecord], progress: &ProgressDisplay) -> Result<Vec<String>> {
    apps.iter()
        .map(|app| {
            progress.update(&app.file_name());
            let svg = render_badge(app)?;
            progress.inc();
            Ok(svg)
        })
        .collect()
}

/// Badge directory as linked from the README, relative to the README's directory
fn svg_dir_for_readme(readme: &Path, svg_path: &Path) -> String {
    let relative = readme
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .and_then(|parent| svg_path.strip_prefix(parent).ok())
        .unwrap_or(svg_path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn print_summary(written: &[PathBuf], outcome: Option<&PublishOutcome>) {
    println!(
        "{} {} badge{}",
        style("Generated").green().bold(),
        written.len(),
        if written.len() == 1 { "" } else { "s" }
    );
    for path in written {
        println!("  {}", style(path.display()).dim());
    }

    match outcome {
        Some(PublishOutcome::Pushed { branch, commit }) => println!(
            "{} {} to {}",
            style("Pushed").green().bold(),
            style(commit.get(..7).unwrap_or(commit)).cyan(),
            style(branch).cyan()
        ),
        Some(PublishOutcome::NothingToCommit) => {
            println!("{}", style("Nothing to commit").yellow());
        }
        None => {}
    }
}
