//! Highlight colors for the selected row.
//!
//! Each color carries its SGR foreground code and the code written after
//! the label, followed by a full reset:
//!
//! ```text
//! ESC[<fg>m  label  ESC[<reset>m ESC[0m
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    #[default]
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 6] = [
        HighlightColor::Yellow,
        HighlightColor::Blue,
        HighlightColor::Green,
        HighlightColor::Cyan,
        HighlightColor::Red,
        HighlightColor::Magenta,
    ];

    /// `(foreground, reset)` SGR codes.
    pub fn codes(self) -> (u8, u8) {
        let fg = match self {
            HighlightColor::Red => 31,
            HighlightColor::Green => 32,
            HighlightColor::Yellow => 33,
            HighlightColor::Blue => 34,
            HighlightColor::Magenta => 35,
            HighlightColor::Cyan => 36,
        };
        (fg, 89)
    }

    pub fn name(self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Blue => "blue",
            HighlightColor::Green => "green",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Red => "red",
            HighlightColor::Magenta => "magenta",
        }
    }

    /// Wrap `text` in this color's start/stop escape pair.
    pub fn wrap(self, text: &str) -> String {
        let (fg, reset) = self.codes();
        format!("\x1b[{fg}m{text}\x1b[{reset}m\x1b[0m")
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HighlightColor {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))
    }
}
