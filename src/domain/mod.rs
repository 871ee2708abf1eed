//! Domain models for appstores-feed
//!
//! This module contains pure domain objects representing core business entities.
//! These types are free of external dependencies and contain business rules invariants.

pub mod app;

pub use app::{AppRecord, Icon, Source, display_name};
