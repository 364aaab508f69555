//! Per-header dropdown visibility.
//!
//! Each dropdown is independent; opening one leaves its siblings alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    /// Inline `display` value for a content panel.
    pub fn display_value(&self) -> &'static str {
        match self {
            Self::Shown => "block",
            Self::Hidden => "none",
        }
    }

    /// Reads an inline `display` value; anything but `block` counts as
    /// hidden because the stylesheet collapses the panel by default.
    pub fn from_display(display: Option<&str>) -> Self {
        match display {
            Some(value) if value.trim() == "block" => Self::Shown,
            _ => Self::Hidden,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownState {
    pub is_open: bool,
}

#[derive(Debug, Default)]
pub struct DropdownSet {
    states: Vec<DropdownState>,
}

impl DropdownSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, initial: Visibility) -> DropdownId {
        let id = DropdownId(self.states.len());
        self.states.push(DropdownState {
            is_open: initial == Visibility::Shown,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_open(&self, id: DropdownId) -> Option<bool> {
        self.states.get(id.0).map(|s| s.is_open)
    }

    /// Flips one dropdown and returns its new visibility.
    pub fn toggle(&mut self, id: DropdownId) -> Option<Visibility> {
        let state = self.states.get_mut(id.0)?;
        state.is_open = !state.is_open;
        Some(if state.is_open {
            Visibility::Shown
        } else {
            Visibility::Hidden
        })
    }
}
