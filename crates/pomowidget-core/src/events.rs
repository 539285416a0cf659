use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format;
use crate::timer::{TimerMode, TimerSettings};

/// What a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: TimerMode,
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub running: bool,
}

impl Snapshot {
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms as f64 / 1000.0
    }

    /// `MM:SS` text for the clock face.
    pub fn clock_text(&self) -> String {
        format::clock_text(self.remaining_ms)
    }

    /// 0.0 .. 1.0 elapsed fraction of the current period.
    pub fn progress(&self) -> f64 {
        format::progress(self.remaining_ms, self.total_ms)
    }
}

/// Every engine operation reports what happened as a list of events.
/// Collaborators (renderer, settings store, sound player) consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Render(Snapshot),
    Persist(TimerSettings),
    /// One or more whole-second boundaries were crossed since the last tick.
    SecondElapsed { remaining_secs: u64, crossed: u64 },
    PeriodCompleted {
        mode: TimerMode,
        next: TimerMode,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_render(&self) -> bool {
        matches!(self, Event::Render(_))
    }
}
