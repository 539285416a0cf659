//! Integration tests for a full widget session.
//!
//! Wires the engine to a real `ConfigStore` and `Database` in a temp
//! directory and checks what survives a "restart".

use pomowidget_core::events::Snapshot;
use pomowidget_core::sinks::{Dispatcher, Renderer, SettingsStore, Silent};
use pomowidget_core::timer::{AutoChain, ManualClock, SoundToggles, TimerEngine, TimerMode};
use pomowidget_core::{Config, ConfigStore, Database};
use tempfile::TempDir;

#[derive(Default)]
struct LastFrame(Option<Snapshot>);

impl Renderer for LastFrame {
    fn render(&mut self, snapshot: &Snapshot) {
        self.0 = Some(*snapshot);
    }
}

#[test]
fn settings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let clock = ManualClock::default();

    let store = ConfigStore::new(&path);
    let mut engine = TimerEngine::with_clock(store.load(), clock.clone());
    let mut d = Dispatcher::new(LastFrame::default(), store, Silent);

    let sounds = engine.settings().sounds;
    d.dispatch(sounds, engine.set_duration(TimerMode::Focus, 50));
    d.dispatch(sounds, engine.set_duration(TimerMode::LongBreak, 999));
    d.dispatch(
        sounds,
        engine.set_auto_chain(AutoChain {
            after_focus: true,
            after_break: true,
        }),
    );
    d.dispatch(
        sounds,
        engine.set_sounds(SoundToggles {
            tick: false,
            chime: true,
        }),
    );

    let reloaded = ConfigStore::new(&path).load();
    assert_eq!(&reloaded, engine.settings());
    assert_eq!(reloaded.durations.long_break, 60);

    let fresh = TimerEngine::with_clock(reloaded, clock);
    assert_eq!(fresh.remaining_ms(), 50 * 60 * 1000);
}

#[test]
fn restore_defaults_overwrites_stored_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::default();
    cfg.timer.focus_duration = 90;
    cfg.appearance.set_font("Georgia");
    cfg.save_to(&path).unwrap();

    let store = ConfigStore::new(&path);
    let mut engine = TimerEngine::with_clock(store.load(), ManualClock::default());
    assert_eq!(engine.remaining_ms(), 90 * 60 * 1000);

    let mut d = Dispatcher::new(LastFrame::default(), store, Silent);
    d.dispatch(engine.settings().sounds, engine.restore_defaults());

    let cfg = Config::load_from(&path);
    assert_eq!(cfg.timer.focus_duration, 25);
    assert_eq!(cfg.appearance.font, "Georgia");
    assert_eq!(d.renderer.0.unwrap().clock_text(), "25:00");
}

#[test]
fn running_countdown_resumes_in_a_new_process() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("state.db");
    let clock = ManualClock::default();

    {
        let db = Database::open_at(&db_path).unwrap();
        let mut engine = TimerEngine::with_clock(Default::default(), clock.clone());
        engine.start();
        db.save_timer_state(engine.state()).unwrap();
    }

    // Ten minutes pass with nothing ticking.
    clock.advance_secs(10 * 60);

    let db = Database::open_at(&db_path).unwrap();
    let state = db.load_timer_state().unwrap();
    let mut engine = TimerEngine::from_state(state, clock.clone());
    engine.tick();
    assert!(engine.is_running());
    assert_eq!(engine.remaining_ms(), 15 * 60 * 1000);

    // And if the period ran out while nobody was watching, the next tick completes it.
    clock.advance_secs(20 * 60);
    engine.tick();
    assert_eq!(engine.mode(), TimerMode::ShortBreak);
    assert!(!engine.is_running());
}
