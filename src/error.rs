//! Error types for cast filtering.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a filtering run.
///
/// Malformed record lines are not errors; they are copied through verbatim.
#[derive(Error, Debug)]
pub enum RedactError {
    /// The input recording does not exist.
    #[error("Input file '{}' does not exist", .path.display())]
    InputNotFound { path: PathBuf },

    /// An I/O operation on one of the two file handles failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl RedactError {
    /// Wrap an I/O error with a description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RedactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_display() {
        let err = RedactError::InputNotFound {
            path: PathBuf::from("missing.cast"),
        };
        assert_eq!(err.to_string(), "Input file 'missing.cast' does not exist");
    }

    #[test]
    fn test_io_display_includes_context() {
        let err = RedactError::io(
            "writing out.cast",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(err.to_string(), "writing out.cast: disk full");
    }

    #[test]
    fn test_io_exposes_source() {
        use std::error::Error;
        let err = RedactError::io(
            "reading in.cast",
            io::Error::new(io::ErrorKind::UnexpectedEof, "eof"),
        );
        assert!(err.source().is_some());
    }
}
