mod clock;
mod command;
mod driver;
mod engine;
mod mode;
mod settings;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Command;
pub use driver::drive;
pub use engine::{TimerEngine, TimerState};
pub use mode::{parse_minutes, TimerMode, UnknownMode};
pub use settings::{
    AutoChain, Durations, SoundToggles, TimerSettings, DEFAULT_LONG_BREAK_INTERVAL,
    MAX_LONG_BREAK_INTERVAL,
};
