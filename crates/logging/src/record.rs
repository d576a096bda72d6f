//! crates/logging/src/record.rs
//! Ephemeral log records and their line rendering.

use std::fmt;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::levels::VerbosityLevel;

/// Timestamp layout used at the start of every rendered line.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Resolves the local UTC offset, falling back to UTC.
///
/// The `time` crate refuses to read the local offset once the process has
/// more than one thread, so emitters resolve it once during startup.
#[must_use]
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// A single log call, built and consumed synchronously.
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    level: VerbosityLevel,
    timestamp: OffsetDateTime,
    text: fmt::Arguments<'a>,
}

impl<'a> LogRecord<'a> {
    /// Creates a record with an explicit timestamp.
    #[must_use]
    pub const fn new(level: VerbosityLevel, timestamp: OffsetDateTime, text: fmt::Arguments<'a>) -> Self {
        Self {
            level,
            timestamp,
            text,
        }
    }

    /// Creates a record stamped with the current time in `offset`.
    #[must_use]
    pub fn now(level: VerbosityLevel, offset: UtcOffset, text: fmt::Arguments<'a>) -> Self {
        Self::new(level, OffsetDateTime::now_utc().to_offset(offset), text)
    }

    /// Level of the record.
    #[must_use]
    pub const fn level(&self) -> VerbosityLevel {
        self.level
    }

    /// Time the record was created.
    #[must_use]
    pub const fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

impl fmt::Display for LogRecord<'_> {
    /// Renders `[YYYY-MM-DD HH:MM:SS] [LEVEL] text` without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = self
            .timestamp
            .format(TIMESTAMP_FORMAT)
            .map_err(|_| fmt::Error)?;
        write!(f, "[{stamp}] [{}] {}", self.level, self.text)
    }
}
