//! Classification of cast record lines.
//!
//! Every line after the header is either an output event we can rewrite, or
//! something we copy through untouched. There is no third outcome: JSON
//! errors, other event kinds and odd shapes all become [`Line::PassThrough`].

use crate::format::CastFormatter;
use serde::{Deserialize, Serialize, Serializer};
use std::io::Write;

/// Event kind code for terminal output.
pub const OUTPUT_KIND: &str = "o";

/// An `[time, "o", data]` record.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    pub time: f64,
    pub data: String,
}

impl OutputEvent {
    pub fn new(time: f64, data: impl Into<String>) -> Self {
        Self {
            time,
            data: data.into(),
        }
    }

    /// The same event moved to `time`.
    pub fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Write the event in asciinema's `[t, "o", "data"]` layout, without a
    /// trailing newline.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, CastFormatter);
        self.serialize(&mut ser)
    }
}

impl Serialize for OutputEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.time, OUTPUT_KIND, &self.data).serialize(serializer)
    }
}

/// Wire shape of any three-element event record.
#[derive(Deserialize)]
struct RawEvent(Timestamp, String, String);

/// Event time as recorded: normally a number, occasionally numeric text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Number(f64),
    Text(String),
}

impl Timestamp {
    fn seconds(&self) -> Option<f64> {
        match self {
            Timestamp::Number(secs) => Some(*secs),
            Timestamp::Text(text) => text.trim().parse().ok().filter(|s: &f64| s.is_finite()),
        }
    }
}

/// Result of classifying one record line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Output(OutputEvent),
    PassThrough,
}

impl Line {
    /// Classify a raw record line (trailing newline allowed).
    ///
    /// Bytes that are not valid UTF-8 fail to parse and pass through.
    pub fn classify(line: impl AsRef<[u8]>) -> Self {
        match serde_json::from_slice::<RawEvent>(line.as_ref()) {
            Ok(RawEvent(time, kind, data)) if kind == OUTPUT_KIND => match time.seconds() {
                Some(time) => Line::Output(OutputEvent { time, data }),
                None => Line::PassThrough,
            },
            _ => Line::PassThrough,
        }
    }
}
