//! Consecutive-success streak scoring. Deterministic and timer-free; the
//! celebration signal is just a value the session turns into an event for
//! its rendering/audio collaborators.

use serde::Serialize;

/// Streak snapshot exposed through the query surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComboState {
    pub streak: u32,
}

#[derive(Debug, Clone)]
pub struct ComboScorer {
    streak: u32,
    threshold: u32,
}

impl ComboScorer {
    /// `threshold` is the streak multiple that fires a celebration; zero
    /// disables celebrations entirely.
    pub fn new(threshold: u32) -> Self {
        Self {
            streak: 0,
            threshold,
        }
    }

    /// Registers one successful fulfillment action. Returns the streak value
    /// when it crosses a celebration multiple.
    pub fn on_success(&mut self) -> Option<u32> {
        self.streak = self.streak.saturating_add(1);
        if self.threshold > 0 && self.streak % self.threshold == 0 {
            Some(self.streak)
        } else {
            None
        }
    }

    pub fn on_failure(&mut self) {
        self.streak = 0;
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn state(&self) -> ComboState {
        ComboState {
            streak: self.streak,
        }
    }
}
