//! Countdown engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//!
//! Remaining time is always recomputed from an absolute anchor
//! (`period_start_ms`) and the current clock reading, never by subtracting a
//! per-tick delta. Late or skipped ticks therefore cannot accumulate error.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//! any  --reset--> Idle (full duration)
//! any  --skip / expiry--> Idle (next mode) [--> Running if auto-chained]
//! any  --set_mode--> Idle (new mode)       [--> Running if auto-chained]
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(settings);
//! dispatcher.dispatch(sounds, engine.start());
//! // In a loop:
//! dispatcher.dispatch(sounds, engine.tick());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::command::Command;
use super::mode::TimerMode;
use super::settings::{AutoChain, SoundToggles, TimerSettings, MAX_LONG_BREAK_INTERVAL};
use crate::events::{Event, Snapshot};

/// The engine's complete mutable state.
///
/// Serializable so a session can be parked between process invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    mode: TimerMode,
    #[serde(default)]
    settings: TimerSettings,
    /// Remaining time in milliseconds for the current period. Only
    /// authoritative while idle; while running it is refreshed by `tick()`.
    remaining_ms: u64,
    /// Epoch ms at which the current period would have started had it run
    /// without interruption. Present exactly while running.
    #[serde(default)]
    period_start_ms: Option<u64>,
    /// Focus periods completed this session.
    #[serde(default)]
    completed_focus: u32,
}

impl TimerState {
    /// Fresh idle state in Focus with a full period.
    pub fn new(settings: TimerSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            mode: TimerMode::Focus,
            remaining_ms: settings.durations.total_ms(TimerMode::Focus),
            settings,
            period_start_ms: None,
            completed_focus: 0,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn period_start_ms(&self) -> Option<u64> {
        self.period_start_ms
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    pub fn is_running(&self) -> bool {
        self.period_start_ms.is_some()
    }

    pub fn total_ms(&self) -> u64 {
        self.settings.durations.total_ms(self.mode)
    }

    /// Repair a state that came from outside (disk, another version).
    pub fn sanitized(mut self) -> Self {
        self.settings = self.settings.sanitized();
        self.remaining_ms = self.remaining_ms.min(self.total_ms());
        self
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Core countdown engine.
///
/// Owns one [`TimerState`] and mutates it only through the operations below.
/// Every operation returns the events it produced; an empty list means the
/// call was a no-op.
#[derive(Debug, Clone)]
pub struct TimerEngine<C: Clock = SystemClock> {
    state: TimerState,
    clock: C,
}

impl TimerEngine<SystemClock> {
    pub fn new(settings: TimerSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(settings: TimerSettings, clock: C) -> Self {
        Self {
            state: TimerState::new(settings),
            clock,
        }
    }

    /// Resume from a previously exported state.
    pub fn from_state(state: TimerState, clock: C) -> Self {
        Self {
            state: state.sanitized(),
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn into_state(self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.state.settings
    }

    pub fn remaining_ms(&self) -> u64 {
        self.state.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.state.total_ms()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.state.mode,
            remaining_ms: self.state.remaining_ms,
            total_ms: self.total_ms(),
            running: self.is_running(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle(),
            Command::Reset => self.reset(),
            Command::Skip => self.skip(),
            Command::SetMode { mode } => self.set_mode(mode),
            Command::SetDuration { mode, minutes } => self.set_duration(mode, minutes),
            Command::Quit => Vec::new(),
        }
    }

    pub fn start(&mut self) -> Vec<Event> {
        if self.is_running() {
            return Vec::new();
        }
        // Back-date the anchor so time already spent in this period counts.
        let elapsed = self.total_ms().saturating_sub(self.state.remaining_ms);
        self.state.period_start_ms = Some(self.clock.now_ms().saturating_sub(elapsed));
        debug!(mode = %self.state.mode, remaining_ms = self.state.remaining_ms, "timer started");
        vec![self.render()]
    }

    pub fn pause(&mut self) -> Vec<Event> {
        let Some(start) = self.state.period_start_ms else {
            return Vec::new();
        };
        self.state.remaining_ms = self.remaining_since(start);
        self.state.period_start_ms = None;
        debug!(mode = %self.state.mode, remaining_ms = self.state.remaining_ms, "timer paused");
        vec![self.render()]
    }

    pub fn toggle(&mut self) -> Vec<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Vec<Event> {
        self.state.period_start_ms = None;
        self.state.remaining_ms = self.total_ms();
        debug!(mode = %self.state.mode, "timer reset");
        vec![self.render()]
    }

    /// End the current period now, exactly as if it had run out.
    pub fn skip(&mut self) -> Vec<Event> {
        debug!(mode = %self.state.mode, "period skipped");
        self.complete_period()
    }

    pub fn set_mode(&mut self, next: TimerMode) -> Vec<Event> {
        if next == self.state.mode {
            return vec![self.render()];
        }
        let from = self.state.mode;
        self.state.period_start_ms = None;
        self.state.mode = next;
        self.state.remaining_ms = self.total_ms();
        debug!(%from, to = %next, "mode changed");

        let mut events = vec![self.render()];
        if self.state.settings.auto_chain.for_destination(next) {
            events.extend(self.start());
        }
        events
    }

    /// Change a mode's length. Out-of-range values are clamped.
    ///
    /// Editing the active mode discards progress in the current period and
    /// restarts it at the new full length; a running countdown keeps running.
    pub fn set_duration(&mut self, mode: TimerMode, minutes: i64) -> Vec<Event> {
        let stored = self.state.settings.durations.set(mode, minutes);
        debug!(%mode, requested = minutes, stored, "duration changed");
        if mode == self.state.mode {
            self.state.remaining_ms = self.total_ms();
            if self.is_running() {
                self.state.period_start_ms = Some(self.clock.now_ms());
            }
        }
        vec![self.persist(), self.render()]
    }

    /// Like [`set_duration`](Self::set_duration) but for raw form input.
    pub fn set_duration_input(&mut self, mode: TimerMode, input: &str) -> Vec<Event> {
        self.set_duration(mode, i64::from(mode.clamp_input(input)))
    }

    pub fn set_auto_chain(&mut self, auto_chain: AutoChain) -> Vec<Event> {
        self.state.settings.auto_chain = auto_chain;
        vec![self.persist()]
    }

    pub fn set_sounds(&mut self, sounds: SoundToggles) -> Vec<Event> {
        self.state.settings.sounds = sounds;
        vec![self.persist()]
    }

    pub fn set_long_break_interval(&mut self, interval: u32) -> Vec<Event> {
        self.state.settings.long_break_interval = interval.min(MAX_LONG_BREAK_INTERVAL);
        vec![self.persist()]
    }

    /// Adopt settings edited elsewhere (e.g. in the config file).
    ///
    /// Follows the same rules as the individual setters: only a changed
    /// duration of the active mode re-baselines the countdown. Returns no
    /// events when nothing differs.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Vec<Event> {
        let settings = settings.sanitized();
        if settings == self.state.settings {
            return Vec::new();
        }
        let active_changed = settings.durations.get(self.state.mode)
            != self.state.settings.durations.get(self.state.mode);
        self.state.settings = settings;
        if active_changed {
            self.state.remaining_ms = self.total_ms();
            if self.is_running() {
                self.state.period_start_ms = Some(self.clock.now_ms());
            }
        }
        debug!(active_changed, "settings applied");
        vec![self.persist(), self.render()]
    }

    /// Throw away everything and start over from default settings.
    pub fn restore_defaults(&mut self) -> Vec<Event> {
        self.state = TimerState::default();
        info!("settings restored to defaults");
        vec![self.persist(), self.render()]
    }

    /// Call periodically while running. Does nothing when idle.
    pub fn tick(&mut self) -> Vec<Event> {
        let Some(start) = self.state.period_start_ms else {
            return Vec::new();
        };
        let before_secs = self.state.remaining_ms / 1000;
        let remaining = self.remaining_since(start);
        self.state.remaining_ms = remaining;
        let after_secs = remaining / 1000;
        let elapsed = (after_secs < before_secs).then(|| Event::SecondElapsed {
            remaining_secs: after_secs,
            crossed: before_secs - after_secs,
        });

        // On expiry the render of the next period supersedes a 00:00 frame.
        if remaining == 0 {
            let mut events: Vec<Event> = elapsed.into_iter().collect();
            events.extend(self.complete_period());
            return events;
        }

        let mut events = vec![self.render()];
        events.extend(elapsed);
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn remaining_since(&self, start: u64) -> u64 {
        let elapsed = self.clock.now_ms().saturating_sub(start);
        self.total_ms().saturating_sub(elapsed)
    }

    fn complete_period(&mut self) -> Vec<Event> {
        self.state.period_start_ms = None;
        self.state.remaining_ms = 0;

        let finished = self.state.mode;
        if finished == TimerMode::Focus {
            self.state.completed_focus = self.state.completed_focus.saturating_add(1);
        }
        let next = self.next_mode_after(finished);
        info!(%finished, %next, completed_focus = self.state.completed_focus, "period completed");

        let mut events = vec![Event::PeriodCompleted {
            mode: finished,
            next,
            at: self.now_utc(),
        }];
        events.extend(self.set_mode(next));
        events
    }

    fn next_mode_after(&self, finished: TimerMode) -> TimerMode {
        match finished {
            TimerMode::Focus => {
                let interval = self.state.settings.long_break_interval;
                if interval > 0 && self.state.completed_focus % interval == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        }
    }

    fn render(&self) -> Event {
        Event::Render(self.snapshot())
    }

    fn persist(&self) -> Event {
        Event::Persist(self.state.settings)
    }

    fn now_utc(&self) -> DateTime<Utc> {
        i64::try_from(self.clock.now_ms())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default()
    }
}
