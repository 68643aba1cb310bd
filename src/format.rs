//! JSON layout for rewritten event lines.
//!
//! asciinema writes events as `[0.25, "o", "text"]`: a space after each
//! comma, non-ASCII text as `\uXXXX` escapes, and floats in Python's
//! shortest-repr style. Rewritten events use the same layout so lines we
//! only re-timestamp stay byte-identical to the recorder's own output.

use serde_json::ser::Formatter;
use std::io::{self, Write};

/// `serde_json` formatter producing asciinema's event layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastFormatter;

impl Formatter for CastFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    /// Fragments arrive with quotes, backslashes and C0 controls already
    /// escaped; what is left to escape is DEL and everything non-ASCII.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest round-trip float text, exponent written as `e+16` / `e-05`.
pub fn format_float(value: f64) -> String {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn to_cast_json<T: Serialize>(value: &T) -> String {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, CastFormatter);
        value.serialize(&mut ser).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_float_plain() {
        assert_eq!(format_float(0.25), "0.25");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(123.456789), "123.456789");
        assert_eq!(format_float(0.0001), "0.0001");
    }

    #[test]
    fn test_format_float_exponent() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        assert_eq!(format_float(2e100), "2e+100");
    }

    #[test]
    fn test_array_spacing() {
        assert_eq!(to_cast_json(&(1.5, "o", "ab")), r#"[1.5, "o", "ab"]"#);
    }

    #[test]
    fn test_object_spacing() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("height", 24);
        map.insert("width", 80);
        assert_eq!(to_cast_json(&map), r#"{"height": 24, "width": 80}"#);
    }

    #[test]
    fn test_non_ascii_escaped() {
        assert_eq!(to_cast_json(&"café"), r#""caf\u00e9""#);
        assert_eq!(to_cast_json(&"\u{7f}"), r#""\u007f""#);
    }

    #[test]
    fn test_astral_chars_use_surrogate_pairs() {
        assert_eq!(to_cast_json(&"a😀b"), r#""a\ud83d\ude00b""#);
    }

    #[test]
    fn test_control_chars_keep_json_escapes() {
        assert_eq!(
            to_cast_json(&"\x1b[1;1H\r\n\t\"\\"),
            r#""\u001b[1;1H\r\n\t\"\\""#
        );
    }
}
