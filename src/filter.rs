//! Overlay-removing stream filter.
//!
//! A recording is filtered in one pass, one line at a time. The header is
//! copied as-is; each later line goes through [`RedactFilter::step`], which
//! decides whether to emit a rewritten event, copy the raw line, or drop it.
//!
//! When an output event carries both a cursor-position sequence and the
//! overlay tag, a skip session opens. Everything up to the event containing
//! the matching exit marker is dropped, and the time spent inside the
//! session is removed from all later timestamps.

use crate::cursor::CursorPosition;
use crate::error::{RedactError, Result};
use crate::event::{Line, OutputEvent};
use crate::stats::RedactStats;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Text the overlay prints when it opens.
pub const OVERLAY_TAG: &str = "Atuin";

/// What to do with one record line.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write this event as a JSON line.
    Emit(OutputEvent),
    /// Copy the raw line unchanged.
    PassThrough,
    /// Write nothing.
    Drop,
}

/// An open skip session.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipSession {
    /// Substring that closes the session.
    pub exit_marker: String,
    /// Timestamp of the event that opened it.
    pub started_at: f64,
}

/// Scan state threaded through every record line.
#[derive(Debug, Clone, Default)]
pub struct RedactFilter {
    last_timestamp: f64,
    time_offset: f64,
    skip: Option<SkipSession>,
    stats: RedactStats,
}

impl RedactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest timestamp emitted so far.
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    /// Total time removed by closed skip sessions.
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    pub fn skip_session(&self) -> Option<&SkipSession> {
        self.skip.as_ref()
    }

    pub fn stats(&self) -> &RedactStats {
        &self.stats
    }

    /// Process one record line (any line after the header).
    pub fn step(&mut self, line: impl AsRef<[u8]>) -> Action {
        let event = match Line::classify(line) {
            Line::Output(event) => event,
            Line::PassThrough => {
                trace!("passing through non-output line");
                self.stats.passed_through += 1;
                return Action::PassThrough;
            }
        };

        match self.skip.take() {
            None => match Self::skip_entry(&event) {
                Some(exit_marker) => {
                    debug!(
                        time = event.time,
                        exit_marker = ?exit_marker,
                        "overlay opened, skipping"
                    );
                    self.skip = Some(SkipSession {
                        exit_marker,
                        started_at: event.time,
                    });
                    self.stats.skip_sessions += 1;
                    self.stats.events_dropped += 1;
                    Action::Drop
                }
                None => self.emit(event),
            },
            Some(session) if event.data.contains(&session.exit_marker) => {
                let removed = event.time - session.started_at;
                self.time_offset += removed;
                self.stats.time_removed += removed;
                debug!(
                    time = event.time,
                    removed,
                    offset = self.time_offset,
                    "overlay closed"
                );
                self.emit(event)
            }
            Some(session) => {
                self.skip = Some(session);
                self.stats.events_dropped += 1;
                Action::Drop
            }
        }
    }

    /// End of input. Returns the run summary.
    pub fn finish(mut self) -> RedactStats {
        if let Some(session) = &self.skip {
            warn!(
                started_at = session.started_at,
                exit_marker = ?session.exit_marker,
                "input ended inside an overlay; remainder dropped"
            );
            self.stats.unterminated_skip = true;
        }
        self.stats
    }

    /// Exit marker for an event that opens an overlay, if it does.
    fn skip_entry(event: &OutputEvent) -> Option<String> {
        if !event.data.contains(OVERLAY_TAG) {
            return None;
        }
        CursorPosition::find_first(&event.data).map(|pos| pos.exit_marker())
    }

    fn emit(&mut self, event: OutputEvent) -> Action {
        let adjusted = (event.time - self.time_offset).max(self.last_timestamp);
        self.last_timestamp = adjusted;
        self.stats.events_kept += 1;
        Action::Emit(event.at(adjusted))
    }
}

/// Filter a whole recording from `reader` into `writer`.
///
/// Lines are read as raw bytes so pass-through output is byte-exact,
/// including `\r\n` endings and a missing final newline.
pub fn redact_stream<R: BufRead, W: Write>(mut reader: R, writer: W) -> Result<RedactStats> {
    let header = read_header(&mut reader).map_err(|e| RedactError::io("reading header", e))?;
    redact_records(header, reader, writer)
}

/// Filter the recording at `input` into `output`.
///
/// The header is read before the output is created, so an unreadable input
/// leaves `output` untouched. The output's parent directory is created if
/// needed, and an existing output file is truncated.
pub fn redact_file(input: &Path, output: &Path) -> Result<RedactStats> {
    if !input.exists() {
        return Err(RedactError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let mut reader = File::open(input)
        .map(BufReader::new)
        .map_err(|e| RedactError::io(format!("opening {}", input.display()), e))?;
    let header = read_header(&mut reader)
        .map_err(|e| RedactError::io(format!("reading {}", input.display()), e))?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| RedactError::io(format!("creating {}", parent.display()), e))?;
    }
    let writer = File::create(output)
        .map(BufWriter::new)
        .map_err(|e| RedactError::io(format!("creating {}", output.display()), e))?;

    debug!(input = %input.display(), output = %output.display(), "filtering recording");
    redact_records(header, reader, writer)
}

/// First line of the recording, terminator included. Empty for empty input.
fn read_header<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header)?;
    Ok(header)
}

fn redact_records<R: BufRead, W: Write>(
    header: Vec<u8>,
    mut reader: R,
    mut writer: W,
) -> Result<RedactStats> {
    let mut filter = RedactFilter::new();
    let mut lines_read = 0;

    if !header.is_empty() {
        lines_read += 1;
        writer
            .write_all(&header)
            .map_err(|e| RedactError::io("writing header", e))?;
    }

    let mut buf = header;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| RedactError::io(format!("reading line {}", lines_read + 1), e))?;
        if n == 0 {
            break;
        }
        lines_read += 1;

        match filter.step(&buf) {
            Action::Emit(event) => {
                event
                    .write_json(&mut writer)
                    .map_err(|e| RedactError::io("writing event", e.into()))?;
                writer
                    .write_all(b"\n")
                    .map_err(|e| RedactError::io("writing event", e))?;
            }
            Action::PassThrough => writer
                .write_all(&buf)
                .map_err(|e| RedactError::io("writing line", e))?,
            Action::Drop => {}
        }
    }

    writer
        .flush()
        .map_err(|e| RedactError::io("flushing output", e))?;

    let mut stats = filter.finish();
    stats.lines_read = lines_read;
    info!(%stats, "recording filtered");
    Ok(stats)
}
