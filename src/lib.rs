//! Client-side interaction layer for the Netrun Systems site: responsive
//! navigation menu, nested dropdowns, scroll-hide header, flash banner
//! auto-dismiss and full-card links.
//!
//! The controllers are plain state machines behind the [`app::Dom`] and
//! [`app::Scheduler`] seams. In the browser build a `web-sys` adapter
//! installs everything on page load; natively the in-memory document
//! drives the same code.

pub mod app;
pub mod ui;

#[cfg(target_arch = "wasm32")]
mod entry;

pub use app::{InstallReport, SiteUi, SiteUiSettings, UiError};
