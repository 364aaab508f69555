//! Flash banner auto-dismiss lifecycle.
//!
//! Banners collected at load move `Visible -> Fading -> Removed`. One shared
//! delay starts every fade; each banner then finishes on its own timer.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTiming {
    pub delay: Duration,
    pub fade: Duration,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(5000),
            fade: Duration::from_millis(500),
        }
    }
}

impl FlashTiming {
    /// CSS `transition` value for the fade, e.g. `opacity 0.5s ease`.
    pub fn transition_css(&self) -> String {
        format!("opacity {}s ease", self.fade.as_secs_f64())
    }
}

#[derive(Debug)]
pub struct FlashDismisser {
    phases: Vec<FlashPhase>,
    timing: FlashTiming,
}

impl FlashDismisser {
    pub fn new(count: usize, timing: FlashTiming) -> Self {
        Self {
            phases: vec![FlashPhase::Visible; count],
            timing,
        }
    }

    pub fn timing(&self) -> FlashTiming {
        self.timing
    }

    /// Nothing to schedule when no banner was present at load.
    pub fn is_armed(&self) -> bool {
        !self.phases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, id: FlashId) -> Option<FlashPhase> {
        self.phases.get(id.0).copied()
    }

    /// Moves every visible banner to `Fading` and returns them.
    pub fn begin_fade(&mut self) -> Vec<FlashId> {
        self.phases
            .iter_mut()
            .enumerate()
            .filter(|(_, phase)| **phase == FlashPhase::Visible)
            .map(|(i, phase)| {
                *phase = FlashPhase::Fading;
                FlashId(i)
            })
            .collect()
    }

    /// Finishes one fading banner. Returns false for any other phase.
    pub fn remove(&mut self, id: FlashId) -> bool {
        match self.phases.get_mut(id.0) {
            Some(phase @ FlashPhase::Fading) => {
                *phase = FlashPhase::Removed;
                true
            }
            _ => false,
        }
    }
}
