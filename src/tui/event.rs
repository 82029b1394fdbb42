//! Key decoder: raw input chunks → [`Action`].
//!
//! Stdin is read in raw mode, so a chunk is whatever bytes the terminal
//! sent in one go. Usually that is one key, but held arrow keys and pastes
//! can deliver several at once, so [`decode_chunk`] splits them first.
//!
//! Decoding is total: anything unrecognized is `Action::Ignore`.

use crate::core::action::Action;

const ESC: char = '\u{1b}';

/// Decode a single key sequence.
pub fn decode(chunk: &str) -> Action {
    match chunk {
        // Ctrl+D behaves like Enter
        "\r" | "\n" | "\r\n" => Action::Confirm,
        "\u{4}" => Action::Confirm,
        "\u{3}" => Action::Cancel,
        // CSI form, and SS3 form used in application cursor mode
        "\x1b[A" | "\x1bOA" => Action::MoveUp,
        "\x1b[B" | "\x1bOB" => Action::MoveDown,
        _ => Action::Ignore,
    }
}

/// Decode every key in a chunk, in order.
pub fn decode_chunk(chunk: &str) -> impl Iterator<Item = Action> + '_ {
    KeySequences { rest: chunk }.map(decode)
}

/// Splits a chunk into individual key sequences.
///
/// Recognized shapes: `ESC [ params final`, `ESC O x`, `ESC x`, `\r\n`, and
/// single characters. A lone trailing `ESC` is its own sequence.
struct KeySequences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for KeySequences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;

        let end = match first {
            ESC => escape_len(self.rest),
            '\r' if self.rest[1..].starts_with('\n') => 2,
            c => c.len_utf8(),
        };

        let (key, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(key)
    }
}

/// Byte length of the escape sequence at the start of `s` (which begins with ESC).
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => {
            // CSI: parameter/intermediate bytes 0x20..=0x3F, then one final byte 0x40..=0x7E
            let mut i = 2;
            while let Some(&b) = bytes.get(i) {
                if (0x40..=0x7e).contains(&b) {
                    return i + 1;
                }
                if !(0x20..=0x3f).contains(&b) {
                    // Malformed; stop before the offending byte
                    return i;
                }
                i += 1;
            }
            bytes.len()
        }
        Some(b'O') => {
            if bytes.len() > 2 && bytes[2].is_ascii() {
                3
            } else {
                2
            }
        }
        // ESC followed by another ESC or a control byte starts a new key
        Some(&b) if b == ESC as u8 || b < 0x20 => 1,
        // Alt+key: ESC plus one character
        Some(_) => 1 + s[1..].chars().next().map_or(0, char::len_utf8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_keys() {
        for key in ["\r", "\n", "\r\n", "\u{4}"] {
            assert_eq!(decode(key), Action::Confirm, "{key:?}");
        }
    }

    #[test]
    fn test_cancel_key() {
        assert_eq!(decode("\u{3}"), Action::Cancel);
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode("\x1b[A"), Action::MoveUp);
        assert_eq!(decode("\x1b[B"), Action::MoveDown);
        assert_eq!(decode("\x1bOA"), Action::MoveUp);
        assert_eq!(decode("\x1bOB"), Action::MoveDown);
    }

    #[test]
    fn test_everything_else_is_ignored() {
        for key in ["", "a", "q", " ", "\x1b", "\x1b[C", "\x1b[D", "\x1b[1;5A", "é", "\t"] {
            assert_eq!(decode(key), Action::Ignore, "{key:?}");
        }
    }

    #[test]
    fn test_chunk_with_single_key_matches_decode() {
        for key in ["\r", "\u{3}", "\x1b[A", "\x1b[B", "x"] {
            let actions: Vec<Action> = decode_chunk(key).collect();
            assert_eq!(actions, vec![decode(key)]);
        }
    }

    #[test]
    fn test_chunk_with_several_keys() {
        let actions: Vec<Action> = decode_chunk("\x1b[B\x1b[Bx\r").collect();
        assert_eq!(
            actions,
            vec![
                Action::MoveDown,
                Action::MoveDown,
                Action::Ignore,
                Action::Confirm
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_confirm() {
        let actions: Vec<Action> = decode_chunk("\r\n").collect();
        assert_eq!(actions, vec![Action::Confirm]);
    }

    #[test]
    fn test_modified_arrow_is_one_ignored_key() {
        let actions: Vec<Action> = decode_chunk("\x1b[1;5A\x1b[A").collect();
        assert_eq!(actions, vec![Action::Ignore, Action::MoveUp]);
    }

    #[test]
    fn test_lone_escape_and_alt_key() {
        let actions: Vec<Action> = decode_chunk("\x1b").collect();
        assert_eq!(actions, vec![Action::Ignore]);

        let actions: Vec<Action> = decode_chunk("\x1bx\u{3}").collect();
        assert_eq!(actions, vec![Action::Ignore, Action::Cancel]);

        let actions: Vec<Action> = decode_chunk("\x1b\u{3}").collect();
        assert_eq!(actions, vec![Action::Ignore, Action::Cancel]);
    }

    #[test]
    fn test_multibyte_characters_are_split_safely() {
        let actions: Vec<Action> = decode_chunk("日本\r").collect();
        assert_eq!(actions, vec![Action::Ignore, Action::Ignore, Action::Confirm]);
    }
}
