//! Summary counters for a filtering run.

use std::fmt;

/// What a run did to the recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedactStats {
    /// Lines read, header included.
    pub lines_read: usize,
    /// Output events written with an adjusted timestamp.
    pub events_kept: usize,
    /// Output events swallowed by skip sessions.
    pub events_dropped: usize,
    /// Lines copied verbatim (header excluded).
    pub passed_through: usize,
    /// Skip sessions that were opened.
    pub skip_sessions: usize,
    /// Seconds cut from the timeline by closed skip sessions.
    pub time_removed: f64,
    /// Input ended while a skip session was still open.
    pub unterminated_skip: bool,
}

impl fmt::Display for RedactStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines in, {} events kept, {} dropped, {} passed through, \
             {} skip sessions, {:.3}s removed",
            self.lines_read,
            self.events_kept,
            self.events_dropped,
            self.passed_through,
            self.skip_sessions,
            self.time_removed
        )?;
        if self.unterminated_skip {
            write!(f, " (last skip never closed)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let stats = RedactStats::default();
        assert_eq!(stats.lines_read, 0);
        assert_eq!(stats.time_removed, 0.0);
        assert!(!stats.unterminated_skip);
    }

    #[test]
    fn test_display() {
        let stats = RedactStats {
            lines_read: 6,
            events_kept: 3,
            events_dropped: 2,
            passed_through: 0,
            skip_sessions: 1,
            time_removed: 1.0,
            unterminated_skip: false,
        };
        assert_eq!(
            stats.to_string(),
            "6 lines in, 3 events kept, 2 dropped, 0 passed through, 1 skip sessions, 1.000s removed"
        );
    }

    #[test]
    fn test_display_flags_unterminated() {
        let stats = RedactStats {
            unterminated_skip: true,
            ..Default::default()
        };
        assert!(stats.to_string().ends_with("(last skip never closed)"));
    }
}
