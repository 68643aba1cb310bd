//! Cursor-position escape sequences (`ESC [ row ; col H`).
//!
//! These are only used as textual markers: the first one found in an
//! overlay's output tells us which sequence will close the overlay.

use regex::Regex;
use std::sync::LazyLock;

static CURSOR_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[([0-9]+);([0-9]+)H").expect("cursor-position pattern is valid")
});

/// A cursor-position command found in event text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPosition {
    /// Row digits as written, leading zeros included.
    pub row: String,
    /// Column digits as written.
    pub col: String,
}

impl CursorPosition {
    /// Find the first cursor-position sequence anywhere in `text`.
    pub fn find_first(text: &str) -> Option<Self> {
        let caps = CURSOR_POSITION.captures(text)?;
        Some(Self {
            row: caps[1].to_string(),
            col: caps[2].to_string(),
        })
    }

    /// The sequence that ends an overlay opened at this position.
    ///
    /// The overlay is drawn one column right of where the cursor is
    /// restored, so the exit marker is the same row at `col - 1`.
    pub fn exit_marker(&self) -> String {
        format!("\x1b[{};{}H", self.row, decrement(&self.col))
    }
}

/// `digits - 1` in canonical decimal, with no width limit. `"0"` gives `"-1"`.
fn decrement(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return "-1".to_string();
    }

    let mut out = trimmed.as_bytes().to_vec();
    for digit in out.iter_mut().rev() {
        if *digit == b'0' {
            *digit = b'9';
        } else {
            *digit -= 1;
            break;
        }
    }

    let text = String::from_utf8_lossy(&out);
    match text.trim_start_matches('0') {
        "" => "0".to_string(),
        rest => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_simple() {
        let pos = CursorPosition::find_first("\x1b[5;10HAtuin").unwrap();
        assert_eq!(pos.row, "5");
        assert_eq!(pos.col, "10");
    }

    #[test]
    fn test_find_first_not_at_start() {
        let pos = CursorPosition::find_first("prompt $ \x1b[12;3Hsearch").unwrap();
        assert_eq!(pos.row, "12");
        assert_eq!(pos.col, "3");
    }

    #[test]
    fn test_only_first_match_counts() {
        let pos = CursorPosition::find_first("\x1b[2;7Ha\x1b[9;40Hb").unwrap();
        assert_eq!(pos.exit_marker(), "\x1b[2;6H");
    }

    #[test]
    fn test_no_match() {
        assert!(CursorPosition::find_first("plain text").is_none());
        assert!(CursorPosition::find_first("\x1b[5H").is_none());
        assert!(CursorPosition::find_first("\x1b[5;10f").is_none());
        assert!(CursorPosition::find_first("[5;10H").is_none());
    }

    #[test]
    fn test_exit_marker_keeps_row_digits() {
        let pos = CursorPosition::find_first("\x1b[05;10H").unwrap();
        assert_eq!(pos.exit_marker(), "\x1b[05;9H");
    }

    #[test]
    fn test_exit_marker_normalizes_column() {
        let pos = CursorPosition::find_first("\x1b[1;010H").unwrap();
        assert_eq!(pos.exit_marker(), "\x1b[1;9H");
    }

    #[test]
    fn test_exit_marker_column_zero() {
        let pos = CursorPosition::find_first("\x1b[3;0H").unwrap();
        assert_eq!(pos.exit_marker(), "\x1b[3;-1H");
    }

    #[test]
    fn test_huge_column_still_decrements() {
        let pos = CursorPosition::find_first("\x1b[1;100000000000000000000H").unwrap();
        assert_eq!(pos.exit_marker(), "\x1b[1;99999999999999999999H");
    }

    #[test]
    fn test_decrement() {
        assert_eq!(decrement("1"), "0");
        assert_eq!(decrement("000"), "-1");
        assert_eq!(decrement("10"), "9");
        assert_eq!(decrement("0100"), "99");
        assert_eq!(decrement("1234"), "1233");
    }
}
