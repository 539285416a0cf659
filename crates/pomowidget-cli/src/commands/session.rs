//! Shared plumbing for commands that touch the timer.
//!
//! Each CLI invocation is a short-lived process, so the engine is parked in
//! the state database between runs. Because a running countdown is stored as
//! an absolute anchor, it keeps counting while no process is alive.

use pomowidget_core::storage::{ConfigStore, Database};
use pomowidget_core::timer::SystemClock;
use pomowidget_core::{Event, SettingsStore, Snapshot, TimerEngine};
use serde::Serialize;
use tracing::{debug, warn};

/// What one-shot timer commands print.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub clock: String,
    pub progress: f64,
    /// Periods that finished since the last invocation or during this one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<Event>,
}

pub struct Session {
    db: Database,
    store: ConfigStore,
    pub engine: TimerEngine<SystemClock>,
    completed: Vec<Event>,
}

impl Session {
    /// Load settings and the parked engine, then catch up with the clock.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open()?;
        let store = ConfigStore::open_default()?;
        let settings = store.load();

        let mut engine = match db.load_timer_state() {
            Some(state) => TimerEngine::from_state(state, SystemClock),
            None => {
                debug!("no parked timer, starting fresh");
                TimerEngine::new(settings)
            }
        };
        // The config file may have been edited since the state was parked.
        engine.apply_settings(settings);

        let mut session = Self {
            db,
            store,
            engine,
            completed: Vec::new(),
        };
        let events = session.engine.tick();
        session.handle(events);
        Ok(session)
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Persist settings changes and remember completions for the report.
    pub fn handle(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::Persist(settings) => {
                    if let Err(e) = self.store.persist(&settings) {
                        warn!(error = %e, "failed to persist settings");
                    }
                }
                event @ Event::PeriodCompleted { .. } => self.completed.push(event),
                Event::Render(_) | Event::SecondElapsed { .. } => {}
            }
        }
    }

    pub fn report(&self) -> StatusReport {
        let snapshot = self.engine.snapshot();
        StatusReport {
            clock: snapshot.clock_text(),
            progress: snapshot.progress(),
            snapshot,
            completed: self.completed.clone(),
        }
    }

    /// Save the engine for the next invocation.
    pub fn park(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.db.save_timer_state(self.engine.state())?;
        Ok(())
    }

    /// Drop the parked engine so the next invocation starts fresh, then
    /// print the report as JSON.
    pub fn discard(self) -> Result<(), Box<dyn std::error::Error>> {
        self.db.clear_timer_state()?;
        debug!("parked timer cleared");
        println!("{}", serde_json::to_string_pretty(&self.report())?);
        Ok(())
    }

    /// Park the engine and print the report as JSON.
    pub fn finish(self) -> Result<(), Box<dyn std::error::Error>> {
        self.park()?;
        println!("{}", serde_json::to_string_pretty(&self.report())?);
        Ok(())
    }
}
