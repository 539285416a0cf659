//! User-tunable timer settings.
//!
//! These are the values the settings store persists: per-mode durations,
//! auto-chain flags, sound toggles and the long-break cycle length.

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;

pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;
pub const MAX_LONG_BREAK_INTERVAL: u32 = 12;

/// Configured length of each mode, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub focus: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}

impl Durations {
    pub fn get(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }

    /// Store a clamped value for `mode` and return what was stored.
    pub fn set(&mut self, mode: TimerMode, minutes: i64) -> u32 {
        let clamped = mode.clamp_minutes(minutes);
        match mode {
            TimerMode::Focus => self.focus = clamped,
            TimerMode::ShortBreak => self.short_break = clamped,
            TimerMode::LongBreak => self.long_break = clamped,
        }
        clamped
    }

    /// Duration of `mode` in milliseconds.
    pub fn total_ms(&self, mode: TimerMode) -> u64 {
        u64::from(self.get(mode)) * 60 * 1000
    }

    pub fn sanitized(mut self) -> Self {
        for mode in TimerMode::ALL {
            self.set(mode, i64::from(self.get(mode)));
        }
        self
    }
}

/// Whether finishing a period starts the next one without a manual start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoChain {
    pub after_focus: bool,
    pub after_break: bool,
}

impl AutoChain {
    /// The flag that governs entering `destination`.
    pub fn for_destination(&self, destination: TimerMode) -> bool {
        if destination.is_break() {
            self.after_focus
        } else {
            self.after_break
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundToggles {
    pub tick: bool,
    pub chime: bool,
}

impl Default for SoundToggles {
    fn default() -> Self {
        Self {
            tick: true,
            chime: true,
        }
    }
}

/// Everything the engine persists through a settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub durations: Durations,
    pub auto_chain: AutoChain,
    pub sounds: SoundToggles,
    /// Focus completions between long breaks. Zero disables long breaks.
    pub long_break_interval: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            auto_chain: AutoChain::default(),
            sounds: SoundToggles::default(),
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
        }
    }
}

impl TimerSettings {
    pub fn sanitized(self) -> Self {
        Self {
            durations: self.durations.sanitized(),
            long_break_interval: self.long_break_interval.min(MAX_LONG_BREAK_INTERVAL),
            ..self
        }
    }
}
