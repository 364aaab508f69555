//! Mobile menu state machine.
//!
//! The menu is either open or closed. Every transition produces a
//! [`MenuView`], the complete set of page markers for the new state, so the
//! panel marker, overlay marker and body scroll lock are always written
//! together from one value and can never disagree.

use serde::{Deserialize, Serialize};

/// What a trigger click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuMode {
    /// The trigger flips the menu; it can also close it.
    #[default]
    Toggle,
    /// The trigger only opens; closing needs the close button, the overlay
    /// or an outside click.
    OpenOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    TriggerClicked,
    CloseClicked,
    OverlayClicked,
    OutsideClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
}

/// Page markers derived from a [`MenuState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub panel_active: bool,
    pub overlay_active: bool,
    pub scroll_locked: bool,
}

impl MenuView {
    pub fn is_consistent(&self) -> bool {
        self.panel_active == self.overlay_active && self.overlay_active == self.scroll_locked
    }
}

impl MenuState {
    pub fn view(&self) -> MenuView {
        MenuView {
            panel_active: self.is_open,
            overlay_active: self.is_open,
            scroll_locked: self.is_open,
        }
    }

    pub fn next(self, mode: MenuMode, event: MenuEvent) -> MenuState {
        let mut controller = MenuController { mode, state: self };
        controller.handle(event);
        controller.state
    }
}

pub struct MenuController {
    mode: MenuMode,
    state: MenuState,
}

impl MenuController {
    pub fn new(mode: MenuMode) -> Self {
        Self {
            mode,
            state: MenuState::default(),
        }
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Maps a page event onto `toggle_menu`, `open_menu` or `close_menu`.
    pub fn handle(&mut self, event: MenuEvent) -> MenuView {
        match (event, self.mode) {
            (MenuEvent::TriggerClicked, MenuMode::Toggle) => self.toggle_menu(),
            (MenuEvent::TriggerClicked, MenuMode::OpenOnly) => self.open_menu(),
            (MenuEvent::CloseClicked | MenuEvent::OverlayClicked | MenuEvent::OutsideClicked, _) => {
                self.close_menu()
            }
        }
    }

    pub fn toggle_menu(&mut self) -> MenuView {
        self.state.is_open = !self.state.is_open;
        self.state.view()
    }

    pub fn open_menu(&mut self) -> MenuView {
        self.state.is_open = true;
        self.state.view()
    }

    pub fn close_menu(&mut self) -> MenuView {
        self.state.is_open = false;
        self.state.view()
    }
}
