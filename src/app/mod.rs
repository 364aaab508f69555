//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Settings and the marker vocabulary written to the page
//! - `controllers/` - Interaction state machines (menu, dropdowns, scroll-hide, flashes, cards)
//! - `infrastructure/` - Host seams (`Dom`, `Scheduler`), adapters, logging, error
//! - `state.rs` - Page-lifetime coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod state;

// Re-exports for convenient external access
pub use controllers::menu::{MenuController, MenuEvent, MenuMode, MenuState, MenuView};
pub use controllers::scroll_hide::{ScrollConfig, ScrollState};
pub use domain::{SelectorSettings, SiteUiSettings};
pub use infrastructure::dom::{Dom, Scheduler};
pub use infrastructure::error::{Result, UiError};
pub use infrastructure::logging::init_logging;
pub use state::{InstallReport, SiteUi};
