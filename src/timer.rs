//! Per-participant thinking-time clock.
//!
//! The resolution driver starts a participant's timer whenever a decision is
//! installed for them and stops it when they answer. Readings come from the
//! session's [`Clock`]. A snapshot without a timer loads as [`Timer::new`].

use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Source of "now", in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// A hand-driven reading, shared with whoever advances it.
    Manual(Rc<Cell<i64>>),
}

impl Clock {
    /// A manual clock starting at `millis`, plus the handle that moves it.
    pub fn manual(millis: i64) -> (Self, Rc<Cell<i64>>) {
        let handle = Rc::new(Cell::new(millis));
        (Clock::Manual(Rc::clone(&handle)), handle)
    }

    pub fn now(&self) -> i64 {
        match self {
            Clock::System => Utc::now().timestamp_millis(),
            Clock::Manual(millis) => millis.get(),
        }
    }
}

/// Accumulated thinking time, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub sum_elapsed: i64,
    pub started_at: i64,
    pub running: bool,
    /// Time before the first action of the session is not counted.
    pub after_first_action: bool,
    pub last_stopped_at: i64,
}

impl Timer {
    /// A stopped timer with nothing accumulated.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(&mut self, now: i64) {
        self.running = true;
        self.started_at = now;
    }

    /// Stop the clock, banking the running interval once the first action has happened.
    pub fn stop_at(&mut self, now: i64) {
        if !self.running {
            return;
        }
        if self.after_first_action {
            self.sum_elapsed += (now - self.started_at).max(0);
        }
        self.running = false;
        self.last_stopped_at = now;
    }

    /// Called when the participant takes their first action of the session.
    pub fn mark_first_action(&mut self) {
        self.after_first_action = true;
    }

    /// Total counted time as of `now`, including a running interval.
    pub fn elapsed_at(&self, now: i64) -> i64 {
        if self.running && self.after_first_action {
            self.sum_elapsed + (now - self.started_at).max(0)
        } else {
            self.sum_elapsed
        }
    }
}
