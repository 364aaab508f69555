//! Domain layer - core data and page vocabulary.
//!
//! This module contains:
//! - Site UI settings (selectors, thresholds, timings)
//! - Marker classes written to the page

pub mod markers;
pub mod settings;

pub use settings::{SelectorSettings, SiteUiSettings};
