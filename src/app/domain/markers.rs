//! Class names and inline style values the controllers write to the page.
//! Stylesheets key off these, so they are fixed rather than configurable.

/// Menu panel and overlay while the menu is open.
pub const ACTIVE: &str = "active";
/// Header while scrolled away on mobile.
pub const HIDE_ON_SCROLL: &str = "hide-on-scroll";
/// Card that received a synthesized full-card link.
pub const CLICKABLE: &str = "clickable";
/// The synthesized full-card anchor itself.
pub const CARD_LINK: &str = "card-link";

/// Body `overflow` while the menu is open.
pub const SCROLL_LOCKED: &str = "hidden";
/// Empty value clears the inline style, restoring the stylesheet's.
pub const SCROLL_UNLOCKED: &str = "";
