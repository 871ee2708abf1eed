use clap::Parser;
use std::path::PathBuf;

/// Arguments for the generate command
///
/// Every input can also be set through the `INPUT_*` variable GitHub Actions
/// exports for the action input of the same name.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Badges for App Store and Google Play apps:\n    appstores-feed generate --appstore-ids 284882215 --playstore-ids com.example.app\n\n\
                  Mixed id list (ids with a dot are Google Play packages):\n    appstores-feed generate --app-ids 284882215,com.example.app\n\n\
                  Ids from a YAML file, write files only:\n    appstores-feed generate --config feed.yaml --skip-publish\n\n\
                  Also update the feed block in README.md:\n    appstores-feed generate --app-ids 284882215 --readme README.md")]
pub struct GenerateArgs {
    /// Directory the SVG badges are written to
    #[arg(long, env = "INPUT_SVG_PATH", default_value = "images")]
    pub svg_path: PathBuf,

    /// Comma-separated App Store ids
    #[arg(long, env = "INPUT_APPSTORE_IDS", value_name = "IDS")]
    pub appstore_ids: Option<String>,

    /// Comma-separated Google Play package names
    #[arg(long, env = "INPUT_PLAYSTORE_IDS", value_name = "IDS")]
    pub playstore_ids: Option<String>,

    /// Comma-separated ids of either marketplace
    #[arg(long, env = "INPUT_APP_IDS", value_name = "IDS")]
    pub app_ids: Option<String>,

    /// YAML file with `appstore_ids`, `playstore_ids` and `app_ids` lists
    #[arg(long, short = 'c', env = "INPUT_CONFIG_PATH", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name used for the commit
    #[arg(long, env = "INPUT_COMMITTER_USERNAME", default_value = "appstores-feed-bot")]
    pub committer_username: String,

    /// Email used for the commit
    #[arg(
        long,
        env = "INPUT_COMMITTER_EMAIL",
        default_value = "appstores-feed-bot@users.noreply.github.com"
    )]
    pub committer_email: String,

    /// Commit message
    #[arg(long, env = "INPUT_COMMIT_MESSAGE", default_value = "Update appstores feed")]
    pub commit_message: String,

    /// GitHub access token used to push
    #[arg(long, env = "INPUT_GH_TOKEN", hide_env_values = true)]
    pub gh_token: Option<String>,

    /// Repository to push to, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", hide = true)]
    pub repository: Option<String>,

    /// Storefront country code
    #[arg(long, env = "INPUT_COUNTRY", default_value = "us")]
    pub country: String,

    /// Google Play listing language
    #[arg(long, env = "INPUT_LANG", default_value = "en")]
    pub lang: String,

    /// Markdown file whose feed block is rewritten with links to the badges
    #[arg(long, env = "INPUT_README_PATH", value_name = "FILE")]
    pub readme: Option<PathBuf>,

    /// Write the badges without committing or pushing
    #[arg(long)]
    pub skip_publish: bool,
}
