//! Controllers layer - the interaction state machines.
//!
//! Each controller is a small `{state, event} -> {state', effects}`
//! transition with no page access, so it can be exercised without a
//! browser:
//! - Mobile menu open/close
//! - Dropdown visibility
//! - Header scroll-hide
//! - Flash banner dismissal
//! - Card link planning

pub mod card_links;
pub mod dropdown;
pub mod menu;
pub mod notifications;
pub mod scroll_hide;
