//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;

use tokio::sync::mpsc::UnboundedSender;

use crate::tui::input::ChannelInput;
use crate::tui::terminal::Terminal;

/// One call made against a [`RecordingTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    EnterRaw,
    ExitRaw,
    ClearLine,
    Move(i32),
    ColumnZero,
    HideCursor,
    ShowCursor,
    Write(String),
    Flush,
}

/// A terminal that remembers every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    pub ops: Vec<TermOp>,
    /// 1-based `write_raw` call that fails instead of being recorded.
    fail_write_at: Option<usize>,
    write_calls: usize,
}

impl RecordingTerminal {
    /// A terminal whose `nth` write (1-based) returns an I/O error.
    pub fn failing_write(nth: usize) -> Self {
        Self {
            fail_write_at: Some(nth),
            ..Self::default()
        }
    }

    /// Every `write_raw` payload, in order.
    pub fn writes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &TermOp) -> usize {
        self.ops.iter().filter(|op| *op == wanted).count()
    }
}

impl Terminal for RecordingTerminal {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::EnterRaw);
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ExitRaw);
        Ok(())
    }

    fn clear_current_line(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ClearLine);
        Ok(())
    }

    fn move_cursor_relative(&mut self, rows: i32) -> io::Result<()> {
        if rows != 0 {
            self.ops.push(TermOp::Move(rows));
        }
        Ok(())
    }

    fn move_cursor_to_column_zero(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ColumnZero);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::ShowCursor);
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.write_calls += 1;
        if self.fail_write_at == Some(self.write_calls) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"));
        }
        self.ops.push(TermOp::Write(text.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Flush);
        Ok(())
    }
}

pub const UP: &str = "\x1b[A";
pub const DOWN: &str = "\x1b[B";
pub const ENTER: &str = "\r";
pub const CTRL_C: &str = "\u{3}";

/// Channel input preloaded with `keys`, one chunk each.
///
/// The sender is returned so tests decide whether the stream stays open.
pub fn scripted_input(keys: &[&str]) -> (UnboundedSender<String>, ChannelInput) {
    let (tx, input) = ChannelInput::new();
    for key in keys {
        tx.send(key.to_string()).expect("receiver is alive");
    }
    (tx, input)
}
