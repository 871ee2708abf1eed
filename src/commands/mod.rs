//! Command implementations for the appstores-feed CLI

pub mod completions;
pub mod generate;
pub mod version;
