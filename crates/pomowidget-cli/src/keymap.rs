//! Line-based key bindings for the `run` loop.
//!
//! Input arrives one line at a time on stdin, so a binding can never fire
//! while the user is typing into some other prompt.

use pomowidget_core::{Command, TimerMode};

pub const HELP: &str =
    "keys: <space>/p start-pause, r reset, s skip, 1 focus, 2 short break, 3 long break, q quit (then Enter)";

/// Map one line of input to a command. Unknown input maps to `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    // A bare space is the start/pause key, so only strip the newline first.
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line == " " {
        return Some(Command::Toggle);
    }
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "p" | "space" => Some(Command::Toggle),
        "r" | "reset" => Some(Command::Reset),
        "s" | "skip" => Some(Command::Skip),
        "1" => Some(Command::SetMode {
            mode: TimerMode::Focus,
        }),
        "2" => Some(Command::SetMode {
            mode: TimerMode::ShortBreak,
        }),
        "3" => Some(Command::SetMode {
            mode: TimerMode::LongBreak,
        }),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}
