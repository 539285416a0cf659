use serde::{Deserialize, Serialize};

use super::mode::TimerMode;

/// A user action addressed to the engine.
///
/// Input surfaces (keyboard, CLI, tests) translate their input into commands
/// so the driver loop has a single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Skip,
    SetMode { mode: TimerMode },
    SetDuration { mode: TimerMode, minutes: i64 },
    /// Stop the driver loop. The engine itself ignores it.
    Quit,
}
