//! Minimal-diff renderer for the option block.
//!
//! ```text
//! Select:          ← prompt, written once
//! > One            ← row 0
//! > Two            ← row 1   (cursor rests on the highlighted row)
//! > Three          ← row 2
//! ```
//!
//! After the first frame only the rows whose highlight changed are
//! rewritten. Every row write clears the physical line first so a shorter
//! label never leaves stray characters behind, and always ends at column 0.
//!
//! `row` is the cursor's offset from the first option row. It is derived
//! from the moves we issue, never read back from the terminal.

use std::io;

use crate::core::color::HighlightColor;
use crate::core::config::DEFAULT_POINTER;
use crate::tui::terminal::Terminal;

#[cfg(windows)]
const EOL: &str = "\r\n";
#[cfg(not(windows))]
const EOL: &str = "\n";

/// How option rows look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Already trimmed; empty means no prefix at all.
    pointer: String,
    color: HighlightColor,
}

impl RenderStyle {
    pub fn new(pointer: &str, color: HighlightColor) -> Self {
        Self {
            pointer: pointer.trim().to_string(),
            color,
        }
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn color(&self) -> HighlightColor {
        self.color
    }

    /// `"<pointer> <label>"`, or just the label when the pointer is empty.
    pub fn row_text(&self, label: &str) -> String {
        if self.pointer.is_empty() {
            label.to_string()
        } else {
            format!("{} {}", self.pointer, label)
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER, HighlightColor::default())
    }
}

pub struct Renderer<'a, T: Terminal + ?Sized> {
    term: &'a mut T,
    style: &'a RenderStyle,
    row: usize,
}

impl<'a, T: Terminal + ?Sized> Renderer<'a, T> {
    pub fn new(term: &'a mut T, style: &'a RenderStyle) -> Self {
        Self {
            term,
            style,
            row: 0,
        }
    }

    /// Cursor row relative to the first option.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn terminal(&mut self) -> &mut T {
        &mut *self.term
    }

    /// Prompt line, then every option un-highlighted, then back up to row 0.
    pub fn render_initial<'l>(
        &mut self,
        prompt: &str,
        labels: impl IntoIterator<Item = &'l str>,
    ) -> io::Result<()> {
        self.write_line(&format!("{prompt}{EOL}"))?;

        let mut count = 0usize;
        for label in labels {
            self.write_line(&format!("{}{EOL}", self.style.row_text(label)))?;
            count += 1;
        }

        self.term.move_cursor_relative(-to_rows(count))?;
        self.row = 0;
        self.term.flush()
    }

    /// Rewrite `prev` plain and `next` highlighted. `prev == next` just
    /// (re)applies the highlight.
    pub fn render_highlight_change(
        &mut self,
        prev: usize,
        next: usize,
        prev_label: &str,
        next_label: &str,
    ) -> io::Result<()> {
        self.move_to(prev)?;
        self.write_line(&self.style.row_text(prev_label))?;

        self.move_to(next)?;
        let highlighted = self.style.color.wrap(&self.style.row_text(next_label));
        self.write_line(&highlighted)?;

        self.term.flush()
    }

    /// Move past the block and make the cursor visible again.
    pub fn teardown(&mut self, option_count: usize) -> io::Result<()> {
        let below = to_rows(option_count) - to_rows(self.row);
        self.term.move_cursor_relative(below)?;
        self.row = option_count;
        self.term.show_cursor()?;
        self.term.flush()
    }

    fn move_to(&mut self, target: usize) -> io::Result<()> {
        self.term
            .move_cursor_relative(to_rows(target) - to_rows(self.row))?;
        self.row = target;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.term.clear_current_line()?;
        self.term.write_raw(text)?;
        self.term.move_cursor_to_column_zero()
    }
}

fn to_rows(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
