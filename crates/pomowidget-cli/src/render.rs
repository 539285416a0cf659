//! Terminal implementations of the renderer and sound player.

use std::io::Write;

use pomowidget_core::format::progress_bar;
use pomowidget_core::{Renderer, Snapshot, SoundPlayer};

const BAR_WIDTH: usize = 30;

/// Redraws a single status line in place.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// One status line, e.g. `Focus        24:59 [#-----] ▶`.
pub fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "{:<12} {} {} {:>3.0}% {}",
        snapshot.mode.label(),
        snapshot.clock_text(),
        progress_bar(snapshot.progress(), BAR_WIDTH),
        snapshot.progress() * 100.0,
        if snapshot.running { "running" } else { "paused " },
    )
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) {
        // A broken pipe on the status line is not worth stopping the timer for.
        let _ = write!(self.out, "\r{}", status_line(snapshot));
        let _ = self.out.flush();
    }
}

/// Rings the terminal bell on completion. Ticks stay silent unless asked for.
pub struct Bell<W: Write> {
    out: W,
    audible_ticks: bool,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W, audible_ticks: bool) -> Self {
        Self { out, audible_ticks }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPlayer for Bell<W> {
    fn tick(&mut self) {
        if self.audible_ticks {
            let _ = self.out.write_all(b"\x07");
            let _ = self.out.flush();
        }
    }

    fn chime(&mut self) {
        let _ = self.out.write_all(b"\x07\x07");
        let _ = self.out.flush();
    }
}
