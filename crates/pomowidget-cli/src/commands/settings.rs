//! Timer settings: durations, auto-chain, sounds, long-break cycle.
//!
//! These go through the engine rather than the raw config so that clamping
//! and re-baselining behave exactly as they do in the widget.

use clap::Args;
use pomowidget_core::timer::{AutoChain, SoundToggles};
use pomowidget_core::TimerMode;

use super::session::Session;

#[derive(Args)]
pub struct DurationArgs {
    /// Mode to change (focus, short, long)
    pub mode: TimerMode,
    /// Length in minutes; out-of-range or non-numeric input is clamped
    pub minutes: String,
}

#[derive(Args)]
pub struct AutoChainArgs {
    /// Start the break automatically when a focus period ends
    #[arg(long)]
    pub after_focus: Option<bool>,
    /// Start focus automatically when a break ends
    #[arg(long)]
    pub after_break: Option<bool>,
}

#[derive(Args)]
pub struct SoundsArgs {
    /// Tick once per second while running
    #[arg(long)]
    pub tick: Option<bool>,
    /// Chime when a period completes
    #[arg(long)]
    pub chime: Option<bool>,
}

pub fn duration(args: DurationArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let events = session.engine.set_duration_input(args.mode, &args.minutes);
    session.handle(events);
    let stored = session.engine.settings().durations.get(args.mode);
    eprintln!("{} = {stored} min", args.mode);
    session.finish()
}

pub fn auto_chain(args: AutoChainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let current = session.engine.settings().auto_chain;
    let next = AutoChain {
        after_focus: args.after_focus.unwrap_or(current.after_focus),
        after_break: args.after_break.unwrap_or(current.after_break),
    };
    if next != current {
        let events = session.engine.set_auto_chain(next);
        session.handle(events);
    }
    println!("{}", serde_json::to_string_pretty(&next)?);
    session.park()
}

pub fn sounds(args: SoundsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let current = session.engine.settings().sounds;
    let next = SoundToggles {
        tick: args.tick.unwrap_or(current.tick),
        chime: args.chime.unwrap_or(current.chime),
    };
    if next != current {
        let events = session.engine.set_sounds(next);
        session.handle(events);
    }
    println!("{}", serde_json::to_string_pretty(&next)?);
    session.park()
}

pub fn long_break_every(focus_periods: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let events = session.engine.set_long_break_interval(focus_periods);
    session.handle(events);
    match session.engine.settings().long_break_interval {
        0 => println!("long breaks disabled"),
        n => println!("long break after every {n} focus periods"),
    }
    session.park()
}

pub fn restore_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let events = session.engine.restore_defaults();
    session.handle(events);
    session.discard()
}
