//! Header hide-on-scroll for mobile viewports.
//!
//! Pure transitions over a [`ScrollState`] value: no timers, no globals.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub mobile_breakpoint: f64,
    pub hide_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            hide_threshold: 100.0,
        }
    }
}

impl ScrollConfig {
    pub fn is_mobile(&self, width: f64) -> bool {
        width <= self.mobile_breakpoint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub last_scroll_top: f64,
    pub is_hidden: bool,
}

impl ScrollState {
    /// Desktop widths always show the header. The offset is still recorded
    /// so that direction tracking resumes from the current position when
    /// the viewport narrows again.
    pub fn on_scroll(self, offset: f64, width: f64, config: &ScrollConfig) -> ScrollState {
        let is_hidden = config.is_mobile(width)
            && offset > self.last_scroll_top
            && offset > config.hide_threshold;
        ScrollState {
            last_scroll_top: offset.max(0.0),
            is_hidden,
        }
    }

    pub fn on_resize(self, width: f64, config: &ScrollConfig) -> ScrollState {
        if config.is_mobile(width) {
            self
        } else {
            ScrollState {
                is_hidden: false,
                ..self
            }
        }
    }
}
