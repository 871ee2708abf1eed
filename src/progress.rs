//! Progress bar display for badge rendering

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display for rendering and writing badges
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total badge count
    ///
    /// Drawn on stderr, and hidden when stderr is not a terminal.
    pub fn new(total_badges: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let target = if Term::stderr().is_term() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let pb = ProgressBar::with_draw_target(Some(total_badges), target);
        pb.set_style(style);

        Self { pb }
    }

    /// Show the badge being rendered
    pub fn update(&self, file_name: &str) {
        self.pb.set_message(file_name.to_string());
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
