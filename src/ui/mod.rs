//! Page wiring: binds the controllers to document elements and events.

pub mod cards;
pub mod dropdown;
pub mod flash;
pub mod header;
pub mod menu;
