//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - generate: Generate command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod generate;

pub use completions::CompletionsArgs;
pub use generate::GenerateArgs;

/// appstores-feed - App Store and Google Play badges for your repository
#[derive(Parser, Debug)]
#[command(
    name = "appstores-feed",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Render App Store and Google Play apps as SVG badges and commit them",
    long_about = "appstores-feed looks up apps on the App Store and Google Play, renders each one \
                  as a self-contained SVG badge (icon, name, rating, installs, store link) and \
                  commits the badges back to the repository.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  appstores-feed generate --appstore-ids 284882215               \x1b[90m# One App Store app\x1b[0m\n   \
                  appstores-feed generate --app-ids 284882215,com.example.app    \x1b[90m# Mixed id list\x1b[0m\n   \
                  appstores-feed generate --config feed.yaml --skip-publish      \x1b[90m# Write badges only\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch apps, render badges and publish them
    Generate(GenerateArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
