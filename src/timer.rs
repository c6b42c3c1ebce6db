//! Session clock gated by overall completion.
//!
//! The host drives the clock with one [`SessionTimer::tick`] per second of
//! wall time; the timer itself owns no interval. The completion latch
//! guarantees the accumulated elapsed value is reported exactly once per
//! fulfillment episode: stopping re-arms only after a removal breaks
//! completion again.

use serde::Serialize;

const MINUTE_SECONDS: u64 = 60;

/// Timer snapshot exposed through the query surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub running: bool,
    pub stop_latched: bool,
}

/// Outcome of advancing the clock by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub elapsed_seconds: u64,
    /// True on every 60th accumulated second. Purely observational, feeds
    /// the minute-tick sound.
    pub minute_boundary: bool,
}

/// State change produced by re-evaluating the completion gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTransition {
    None,
    /// Completion was just reached; `elapsed_seconds` is delivered here and
    /// nowhere else.
    Stopped { elapsed_seconds: u64 },
    /// A removal broke completion after a stop; the clock resumes and the
    /// latch re-arms.
    Resumed,
}

#[derive(Debug, Clone)]
pub struct SessionTimer {
    elapsed_seconds: u64,
    running: bool,
    stop_latched: bool,
    paused: bool,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    /// Starts running immediately, as the session does.
    pub fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            running: true,
            stop_latched: false,
            paused: false,
        }
    }

    /// Advances one second if the clock is running.
    pub fn tick(&mut self) -> Option<Tick> {
        if !self.running {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(Tick {
            elapsed_seconds: self.elapsed_seconds,
            minute_boundary: self.elapsed_seconds % MINUTE_SECONDS == 0,
        })
    }

    /// Host-driven pause, independent of the completion gate.
    pub fn pause(&mut self) {
        self.paused = true;
        self.running = false;
    }

    /// Resumes a host-driven pause. A latched stop stays stopped.
    pub fn resume(&mut self) {
        self.paused = false;
        if !self.stop_latched {
            self.running = true;
        }
    }

    /// Re-evaluates the completion gate. Must be called after every ledger
    /// mutation, in the mutation's own event-handling step.
    pub fn update_gate(&mut self, all_fulfilled: bool) -> TimerTransition {
        if all_fulfilled && !self.stop_latched {
            self.stop_latched = true;
            self.running = false;
            TimerTransition::Stopped {
                elapsed_seconds: self.elapsed_seconds,
            }
        } else if !all_fulfilled && self.stop_latched {
            self.stop_latched = false;
            if !self.paused {
                self.running = true;
            }
            TimerTransition::Resumed
        } else {
            TimerTransition::None
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            elapsed_seconds: self.elapsed_seconds,
            running: self.running,
            stop_latched: self.stop_latched,
        }
    }
}
