//! # cast-redact
//!
//! Remove shell-history search overlays from asciinema cast v2 recordings.
//!
//! A cast file is a JSON header line followed by one JSON event per line,
//! `[time, kind, data]`. Opening a history search overlay (Atuin) paints a
//! full-screen UI that the viewer of a recording usually does not want to
//! see. This crate finds those stretches by their cursor-position escape
//! sequences, drops them, and shifts the rest of the timeline back so the
//! recording plays without the gap.
//!
//! ## Overview
//!
//! - **Header**: copied byte for byte
//! - **Output events** (`"o"`): timestamps adjusted, overlay events dropped
//! - **Everything else**: input events, resize events, malformed lines, all
//!   copied verbatim
//!
//! ## Example
//!
//! ```
//! use cast_redact::redact_stream;
//!
//! # fn main() -> Result<(), cast_redact::RedactError> {
//! let input = r#"{"version": 2}
//! [1.0, "o", "a"]
//! [2.0, "o", "\u001b[5;10HAtuin"]
//! [2.5, "o", "junk"]
//! [3.0, "o", "\u001b[5;9Hdone"]
//! [4.0, "o", "x"]
//! "#;
//!
//! let mut output = Vec::new();
//! let stats = redact_stream(input.as_bytes(), &mut output)?;
//!
//! let output = String::from_utf8(output).unwrap();
//! assert_eq!(
//!     output.lines().collect::<Vec<_>>(),
//!     vec![
//!         r#"{"version": 2}"#,
//!         r#"[1.0, "o", "a"]"#,
//!         r#"[2.0, "o", "\u001b[5;9Hdone"]"#,
//!         r#"[3.0, "o", "x"]"#,
//!     ]
//! );
//! assert_eq!(stats.skip_sessions, 1);
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod stats;

pub use cursor::CursorPosition;
pub use error::{RedactError, Result};
pub use event::{Line, OUTPUT_KIND, OutputEvent};
pub use filter::{Action, OVERLAY_TAG, RedactFilter, SkipSession, redact_file, redact_stream};
pub use format::CastFormatter;
pub use stats::RedactStats;
