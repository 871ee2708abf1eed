//! Log output
//!
//! Pipeline progress is logged with `tracing` to stderr. `RUST_LOG` overrides
//! the default filter, which shows this crate's `info` events (`debug` with
//! `--verbose`) and only warnings from dependencies.

use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,appstores_feed={level}")
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
