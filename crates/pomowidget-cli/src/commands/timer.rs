use clap::Subcommand;
use pomowidget_core::{Command, TimerMode};

use super::session::Session;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Restart the current period from its full length
    Reset,
    /// End the current period now and move to the next one
    Skip,
    /// Switch to another mode (focus, short, long)
    Mode {
        mode: TimerMode,
    },
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    let command = match action {
        TimerAction::Start => Some(Command::Start),
        TimerAction::Pause => Some(Command::Pause),
        TimerAction::Toggle => Some(Command::Toggle),
        TimerAction::Reset => Some(Command::Reset),
        TimerAction::Skip => Some(Command::Skip),
        TimerAction::Mode { mode } => Some(Command::SetMode { mode }),
        TimerAction::Status => None,
    };
    if let Some(command) = command {
        let events = session.engine.apply(command);
        session.handle(events);
    }

    session.finish()
}
