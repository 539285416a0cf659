//! # pomowidget Core Library
//!
//! This library provides the core logic for the pomowidget Pomodoro timer:
//! a drift-resistant countdown engine plus the settings and persistence
//! around it. Surfaces (the CLI, or any other front end) are thin layers
//! that feed commands in and draw the events that come out.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine that requires the caller
//!   to periodically invoke `tick()` for progress updates
//! - **Driver**: A tokio loop that ticks the engine and applies user commands
//! - **Sinks**: Renderer / settings store / sound player contracts and the
//!   dispatcher that routes engine events to them
//! - **Storage**: TOML-based configuration and a SQLite key-value store for
//!   parking runtime state
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Dispatcher`]: Event routing to collaborators
//! - [`Config`]: Application configuration management
//! - [`Database`]: Runtime state persistence

pub mod appearance;
pub mod error;
pub mod events;
pub mod format;
pub mod sinks;
pub mod storage;
pub mod timer;

pub use appearance::{Appearance, Background};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::{Event, Snapshot};
pub use sinks::{BackgroundProvider, Dispatcher, MemoryStore, Renderer, SettingsStore, Silent, SoundPlayer};
pub use storage::{Config, ConfigStore, Database};
pub use timer::{Command, TimerEngine, TimerMode, TimerSettings, TimerState};
