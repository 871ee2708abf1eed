//! appstores-feed - App Store and Google Play badges for a repository
//!
//! Looks up apps on both marketplaces, renders each one as a self-contained
//! SVG badge, writes the badges into the repository and pushes them.
//! Meant to run as a CI step, configured through `INPUT_*` variables.

use clap::Parser;
use miette::Diagnostic;

mod aggregate;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod git;
mod inline;
mod logging;
mod marketplace;
mod output;
mod progress;
mod readme;
mod render;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::FeedError;

/// `::error::` workflow command, with the message escaped for one line
fn workflow_error(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}

fn running_in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

fn report(err: &FeedError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
    if running_in_github_actions() {
        println!("{}", workflow_error(&err.to_string()));
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}
