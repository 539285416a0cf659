//! Foreground widget: ticks the engine and redraws a status line until quit.

use std::time::Duration;

use pomowidget_core::sinks::Dispatcher;
use pomowidget_core::timer::drive;
use pomowidget_core::{Command, Config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::session::Session;
use crate::keymap;
use crate::render::{Bell, TerminalRenderer};

const MIN_CADENCE_MS: u64 = 50;

pub fn run(cadence_ms: u64, audible_ticks: bool) -> Result<(), Box<dyn std::error::Error>> {
    let cadence = Duration::from_millis(cadence_ms.max(MIN_CADENCE_MS));
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_loop(cadence, audible_ticks));
    // The stdin reader may still be blocked on a read; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run_loop(cadence: Duration, audible_ticks: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let mut dispatcher = Dispatcher::new(
        TerminalRenderer::new(std::io::stdout()),
        session.store().clone(),
        Bell::new(std::io::stderr(), audible_ticks),
    );

    let (tx, rx) = mpsc::channel::<Command>(16);

    let keys = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match keymap::parse_line(&line) {
                Some(command) => {
                    if keys.send(command).await.is_err() {
                        break;
                    }
                }
                None => eprintln!("\n{}", keymap::HELP),
            }
        }
        debug!("stdin closed");
    });

    let signal = tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal.send(Command::Quit).await;
        }
    });

    let goal = Config::load_from(session.store().path()).appearance.goal;
    if !goal.is_empty() {
        eprintln!("goal: {goal}");
    }
    eprintln!("{}", keymap::HELP);
    drive(&mut session.engine, &mut dispatcher, cadence, rx).await;
    println!();

    session.park()
}
