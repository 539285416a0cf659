//! Collaborator contracts and event routing.
//!
//! The engine knows nothing about screens, speakers or files. It emits
//! [`Event`]s and a [`Dispatcher`] hands each one to the collaborator that
//! cares about it.

use tracing::warn;

use crate::appearance::Background;
use crate::error::Result;
use crate::events::{Event, Snapshot};
use crate::timer::{SoundToggles, TimerSettings};

/// Draws the clock, progress bar and active mode.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Loads settings at session start and saves them after each change.
pub trait SettingsStore {
    /// Never fails: missing or unreadable data yields defaults.
    fn load(&self) -> TimerSettings;

    /// # Errors
    /// Returns an error if the settings cannot be written.
    fn persist(&mut self, settings: &TimerSettings) -> Result<()>;
}

/// Plays audible cues.
pub trait SoundPlayer {
    fn tick(&mut self);
    fn chime(&mut self);
}

/// Supplies the decorative background image.
pub trait BackgroundProvider {
    fn background(&self) -> &Background;
}

/// Settings held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<TimerSettings>,
}

impl MemoryStore {
    pub fn with(settings: TimerSettings) -> Self {
        Self {
            saved: Some(settings),
        }
    }

    pub fn saved(&self) -> Option<&TimerSettings> {
        self.saved.as_ref()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> TimerSettings {
        self.saved.unwrap_or_default().sanitized()
    }

    fn persist(&mut self, settings: &TimerSettings) -> Result<()> {
        self.saved = Some(*settings);
        Ok(())
    }
}

/// A sound player that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn tick(&mut self) {}
    fn chime(&mut self) {}
}

/// Routes engine events to collaborators.
pub struct Dispatcher<R, S, P> {
    pub renderer: R,
    pub store: S,
    pub sound: P,
}

impl<R: Renderer, S: SettingsStore, P: SoundPlayer> Dispatcher<R, S, P> {
    pub fn new(renderer: R, store: S, sound: P) -> Self {
        Self {
            renderer,
            store,
            sound,
        }
    }

    /// Deliver `events` in order. A late tick that crossed several second
    /// boundaries plays one tick cue per boundary. Sound cues are dropped
    /// when the matching toggle in `sounds` is off. Storage failures are
    /// logged, not raised.
    pub fn dispatch(&mut self, sounds: SoundToggles, events: impl IntoIterator<Item = Event>) {
        for event in events {
            match event {
                Event::Render(snapshot) => self.renderer.render(&snapshot),
                Event::Persist(settings) => {
                    if let Err(e) = self.store.persist(&settings) {
                        warn!(error = %e, "failed to persist settings");
                    }
                }
                Event::SecondElapsed { crossed, .. } => {
                    if sounds.tick {
                        for _ in 0..crossed {
                            self.sound.tick();
                        }
                    }
                }
                Event::PeriodCompleted { .. } => {
                    if sounds.chime {
                        self.sound.chime();
                    }
                }
            }
        }
    }
}
