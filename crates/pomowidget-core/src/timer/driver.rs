//! The scheduling loop that keeps a running engine ticking.
//!
//! One task owns the engine. Ticks come from a tokio interval and user
//! actions arrive as [`Command`]s over a channel, so every mutation happens
//! on the same task and no locking is needed.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::clock::Clock;
use super::command::Command;
use super::engine::TimerEngine;
use crate::events::Event;
use crate::sinks::{Dispatcher, Renderer, SettingsStore, SoundPlayer};

/// Run until `Command::Quit` arrives or every sender is dropped.
///
/// The interval is only polled while the engine is running, so no tick can
/// touch the state after pause, reset or completion.
pub async fn drive<C, R, S, P>(
    engine: &mut TimerEngine<C>,
    dispatcher: &mut Dispatcher<R, S, P>,
    cadence: Duration,
    mut commands: mpsc::Receiver<Command>,
) where
    C: Clock,
    R: Renderer,
    S: SettingsStore,
    P: SoundPlayer,
{
    let mut ticker = tokio::time::interval(cadence.max(Duration::from_millis(1)));
    // Late ticks are harmless (remaining time is recomputed from the anchor),
    // so there is no point replaying a backlog of them.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    dispatcher.dispatch(engine.settings().sounds, [Event::Render(engine.snapshot())]);

    loop {
        tokio::select! {
            _ = ticker.tick(), if engine.is_running() => {
                let events = engine.tick();
                dispatcher.dispatch(engine.settings().sounds, events);
            }
            command = commands.recv() => match command {
                None | Some(Command::Quit) => {
                    debug!("driver stopped");
                    break;
                }
                Some(command) => {
                    debug!(?command, "command received");
                    let events = engine.apply(command);
                    dispatcher.dispatch(engine.settings().sounds, events);
                }
            },
        }
    }
}
