//! Run configuration for appstores-feed
//!
//! Settings come from command-line flags, the `INPUT_*` variables GitHub
//! Actions sets for action inputs, and an optional YAML file:
//!
//! ```yaml
//! appstore_ids: ["284882215"]
//! playstore_ids: [com.example.app]
//! app_ids: []
//! ```
//!
//! Everything is resolved into one [`FeedConfig`] before any network call.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aggregate::split_by_marketplace;
use crate::cli::GenerateArgs;
use crate::error::{FeedError, Result};
use crate::git::PublishOptions;

/// Identifier lists from a YAML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub appstore_ids: Vec<String>,
    pub playstore_ids: Vec<String>,
    pub app_ids: Vec<String>,
}

impl FileConfig {
    /// Parse a config file from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FeedError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&content).map_err(|e| FeedError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Which ids to look up, and how they were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIds {
    /// One list per marketplace
    ByMarketplace {
        app_store: Vec<String>,
        play_store: Vec<String>,
    },
    /// A single list, routed per id
    Combined(Vec<String>),
}

impl AppIds {
    pub fn len(&self) -> usize {
        match self {
            Self::ByMarketplace {
                app_store,
                play_store,
            } => app_store.len() + play_store.len(),
            Self::Combined(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fully resolved settings for one `generate` run
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub svg_path: PathBuf,
    pub app_ids: AppIds,
    pub country: String,
    pub lang: String,
    pub readme: Option<PathBuf>,
    /// `None` when publishing is skipped
    pub publish: Option<PublishOptions>,
}

impl FeedConfig {
    /// Resolve and validate the `generate` arguments
    pub fn from_args(args: GenerateArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let app_store = merge_ids(args.appstore_ids.as_deref(), &file.appstore_ids);
        let play_store = merge_ids(args.playstore_ids.as_deref(), &file.playstore_ids);
        let combined = merge_ids(args.app_ids.as_deref(), &file.app_ids);

        let app_ids = resolve_app_ids(app_store, play_store, combined);
        if app_ids.is_empty() {
            return Err(FeedError::NoAppIds);
        }

        let publish = if args.skip_publish {
            None
        } else {
            let token = args.gh_token.filter(|t| !t.trim().is_empty());
            let repository = args.repository.filter(|r| !r.trim().is_empty());
            if token.is_some() && repository.is_none() {
                return Err(FeedError::ConfigInvalid {
                    message: "GITHUB_REPOSITORY must be set when an access token is given"
                        .to_string(),
                });
            }
            Some(PublishOptions {
                committer_name: args.committer_username,
                committer_email: args.committer_email,
                message: args.commit_message,
                token,
                repository,
            })
        };

        Ok(Self {
            svg_path: args.svg_path,
            app_ids,
            country: args.country,
            lang: args.lang,
            readme: args.readme,
            publish,
        })
    }
}

/// Split a comma-separated id list, trimming entries and dropping empty ones
pub fn parse_id_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Ids from the command line first, then from the file, without duplicates
fn merge_ids(csv: Option<&str>, file_ids: &[String]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let from_file = file_ids.iter().map(|id| id.trim().to_string());
    for id in csv.map(parse_id_list).unwrap_or_default().into_iter().chain(from_file) {
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

fn resolve_app_ids(
    mut app_store: Vec<String>,
    mut play_store: Vec<String>,
    combined: Vec<String>,
) -> AppIds {
    if app_store.is_empty() && play_store.is_empty() {
        return AppIds::Combined(combined);
    }

    let (extra_app_store, extra_play_store) = split_by_marketplace(&combined);
    for id in extra_app_store {
        if !app_store.contains(&id) {
            app_store.push(id);
        }
    }
    for id in extra_play_store {
        if !play_store.contains(&id) {
            play_store.push(id);
        }
    }
    AppIds::ByMarketplace {
        app_store,
        play_store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::{Cli, Commands};

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let argv = ["appstores-feed", "generate"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list(" 1, 2 ,,com.example.app ,"),
            vec!["1", "2", "com.example.app"]
        );
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ").is_empty());
    }

    #[test]
    fn test_merge_ids_dedupes_keeping_first() {
        let file = vec!["2".to_string(), "3".to_string()];
        assert_eq!(merge_ids(Some("1,2,1"), &file), vec!["1", "2", "3"]);
        assert_eq!(merge_ids(None, &file), vec!["2", "3"]);
    }

    #[test]
    fn test_file_config_from_yaml() {
        let yaml = "appstore_ids:\n  - \"1\"\nplaystore_ids: [com.example.app]\n";
        let config = FileConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.appstore_ids, vec!["1"]);
        assert_eq!(config.playstore_ids, vec!["com.example.app"]);
        assert!(config.app_ids.is_empty());
    }

    #[test]
    fn test_file_config_empty_yaml() {
        assert_eq!(FileConfig::from_yaml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        assert!(FileConfig::from_yaml("apps: [1]\n").is_err());
    }

    #[test]
    fn test_from_args_rejects_empty_id_lists() {
        let args = generate_args(&["--appstore-ids", " , ", "--playstore-ids", ""]);
        let result = FeedConfig::from_args(args);
        assert!(matches!(result, Err(FeedError::NoAppIds)));
    }

    #[test]
    fn test_from_args_by_marketplace() {
        let args = generate_args(&[
            "--appstore-ids",
            "1,2",
            "--playstore-ids",
            "com.example.app",
            "--skip-publish",
        ]);
        let config = FeedConfig::from_args(args).unwrap();
        assert_eq!(
            config.app_ids,
            AppIds::ByMarketplace {
                app_store: vec!["1".to_string(), "2".to_string()],
                play_store: vec!["com.example.app".to_string()],
            }
        );
        assert!(config.publish.is_none());
        assert_eq!(config.svg_path, PathBuf::from("images"));
        assert_eq!(config.country, "us");
        assert_eq!(config.lang, "en");
    }

    #[test]
    fn test_from_args_combined_only() {
        let args = generate_args(&["--app-ids", "com.example.app,1"]);
        let config = FeedConfig::from_args(args).unwrap();
        assert_eq!(
            config.app_ids,
            AppIds::Combined(vec!["com.example.app".to_string(), "1".to_string()])
        );
    }

    #[test]
    fn test_from_args_combined_merges_into_typed_lists() {
        let args = generate_args(&["--appstore-ids", "1", "--app-ids", "com.example.app,1,2"]);
        let config = FeedConfig::from_args(args).unwrap();
        assert_eq!(
            config.app_ids,
            AppIds::ByMarketplace {
                app_store: vec!["1".to_string(), "2".to_string()],
                play_store: vec!["com.example.app".to_string()],
            }
        );
    }

    #[test]
    fn test_from_args_reads_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("feed.yaml");
        std::fs::write(&path, "playstore_ids: [com.example.app]\n").unwrap();

        let args = generate_args(&["--appstore-ids", "1", "--config", path.to_str().unwrap()]);
        let config = FeedConfig::from_args(args).unwrap();
        assert_eq!(config.app_ids.len(), 2);
    }

    #[test]
    fn test_from_args_missing_config_file() {
        let args = generate_args(&["--config", "/nonexistent/feed.yaml"]);
        let result = FeedConfig::from_args(args);
        assert!(matches!(result, Err(FeedError::ConfigReadFailed { .. })));
    }

    #[test]
    fn test_from_args_publish_defaults() {
        let args = generate_args(&["--appstore-ids", "1"]);
        let publish = FeedConfig::from_args(args).unwrap().publish.unwrap();
        assert_eq!(publish.committer_name, "appstores-feed-bot");
        assert_eq!(
            publish.committer_email,
            "appstores-feed-bot@users.noreply.github.com"
        );
        assert_eq!(publish.message, "Update appstores feed");
    }

    #[test]
    fn test_from_args_token_requires_repository() {
        let args = generate_args(&[
            "--appstore-ids",
            "1",
            "--gh-token",
            "abc",
            "--repository",
            "",
        ]);
        let result = FeedConfig::from_args(args);
        assert!(matches!(result, Err(FeedError::ConfigInvalid { .. })));

        let args = generate_args(&[
            "--appstore-ids",
            "1",
            "--gh-token",
            "abc",
            "--repository",
            "owner/repo",
        ]);
        let publish = FeedConfig::from_args(args).unwrap().publish.unwrap();
        assert_eq!(publish.token.as_deref(), Some("abc"));
        assert_eq!(publish.repository.as_deref(), Some("owner/repo"));
    }
}
