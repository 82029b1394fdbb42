//! Terminal I/O adapter.
//!
//! The renderer only ever talks to a [`Terminal`]. The production
//! implementation, [`AnsiTerminal`], queues crossterm commands into any
//! `Write` sink; tests record calls instead.
//!
//! All movement is relative. The cursor position is never queried.

use std::io::{self, Stderr, Stdout, Write};

use crossterm::cursor::{Hide, MoveDown, MoveToColumn, MoveUp, Show};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use log::debug;

pub trait Terminal {
    /// Switch the controlling terminal to raw, unbuffered input.
    fn enter_raw_mode(&mut self) -> io::Result<()>;
    fn exit_raw_mode(&mut self) -> io::Result<()>;
    fn clear_current_line(&mut self) -> io::Result<()>;
    /// Negative moves up, positive moves down, zero writes nothing.
    fn move_cursor_relative(&mut self, rows: i32) -> io::Result<()>;
    fn move_cursor_to_column_zero(&mut self) -> io::Result<()>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn write_raw(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// ANSI escape sequences written to `W`.
///
/// Raw mode is only toggled for the process terminal constructors
/// ([`AnsiTerminal::stdout`], [`AnsiTerminal::stderr`]). An in-memory sink
/// built with [`AnsiTerminal::new`] leaves the real terminal alone.
pub struct AnsiTerminal<W: Write> {
    out: W,
    controls_tty: bool,
    raw: Option<RawModeGuard>,
}

/// Raw mode lifetime guard so the shell is restored on any return path.
struct RawModeGuard {
    tty: bool,
}

impl RawModeGuard {
    fn acquire(tty: bool) -> io::Result<Self> {
        if tty {
            terminal::enable_raw_mode()?;
            debug!("Raw mode enabled");
        }
        Ok(Self { tty })
    }

    fn release(mut self) -> io::Result<()> {
        let tty = std::mem::replace(&mut self.tty, false);
        if tty {
            terminal::disable_raw_mode()?;
            debug!("Raw mode disabled");
        }
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.tty {
            let _ = terminal::disable_raw_mode();
        }
    }
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            controls_tty: false,
            raw: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl AnsiTerminal<Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            controls_tty: true,
            raw: None,
        }
    }
}

impl AnsiTerminal<Stderr> {
    pub fn stderr() -> Self {
        Self {
            out: io::stderr(),
            controls_tty: true,
            raw: None,
        }
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw.is_none() {
            self.raw = Some(RawModeGuard::acquire(self.controls_tty)?);
        }
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> io::Result<()> {
        match self.raw.take() {
            Some(guard) => guard.release(),
            None => Ok(()),
        }
    }

    fn clear_current_line(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine))
    }

    fn move_cursor_relative(&mut self, rows: i32) -> io::Result<()> {
        // CSI 0 A still moves one row on most terminals
        let distance = u16::try_from(rows.unsigned_abs()).unwrap_or(u16::MAX);
        match rows {
            0 => Ok(()),
            r if r < 0 => queue!(self.out, MoveUp(distance)),
            _ => queue!(self.out, MoveDown(distance)),
        }
    }

    fn move_cursor_to_column_zero(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
