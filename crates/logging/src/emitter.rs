//! crates/logging/src/emitter.rs
//! The filtering front end that turns log calls into rendered lines.

use std::fmt;
use std::io::{self, Write};

use logging_sink::LineSink;
use time::UtcOffset;

use crate::levels::VerbosityLevel;
use crate::record::{LogRecord, local_offset};
use crate::state::LevelState;

/// Demonstration lines logged by [`Emitter::run_cycle`], one per level.
pub const CYCLE_MESSAGES: [(VerbosityLevel, &str); 4] = [
    (VerbosityLevel::Error, "This is an error message"),
    (VerbosityLevel::Warning, "This is a warning message"),
    (VerbosityLevel::Info, "This is an info message"),
    (VerbosityLevel::Debug, "This is a debug message"),
];

/// Filters log calls against a [`LevelState`] and writes admitted records to a sink.
///
/// The emitter only reads the level; updates arrive from elsewhere (normally
/// the notification handler), and every call observes the most recent store.
#[derive(Debug)]
pub struct Emitter<'a, W> {
    state: &'a LevelState,
    sink: LineSink<W>,
    offset: UtcOffset,
}

impl<'a, W> Emitter<'a, W> {
    /// Creates an emitter stamping records in the local time zone.
    ///
    /// Call this before spawning threads; see [`local_offset`].
    #[must_use]
    pub fn new(state: &'a LevelState, writer: W) -> Self {
        Self::with_offset(state, writer, local_offset())
    }

    /// Creates an emitter stamping records with a fixed offset.
    #[must_use]
    pub fn with_offset(state: &'a LevelState, writer: W, offset: UtcOffset) -> Self {
        Self {
            state,
            sink: LineSink::new(writer),
            offset,
        }
    }

    /// The level state consulted by every call.
    #[must_use]
    pub const fn state(&self) -> &'a LevelState {
        self.state
    }

    /// Consumes the emitter and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl<W> Emitter<'_, W>
where
    W: Write,
{
    /// Logs `text` at `level`.
    ///
    /// Returns `Ok(false)` without reading the clock or touching the sink when
    /// the current level filters the call out.
    pub fn log(&mut self, level: VerbosityLevel, text: fmt::Arguments<'_>) -> io::Result<bool> {
        if !self.state.allows(level) {
            return Ok(false);
        }
        let record = LogRecord::now(level, self.offset, text);
        self.sink.write(record)?;
        Ok(true)
    }

    /// Logs the four [`CYCLE_MESSAGES`] and returns how many were emitted.
    pub fn run_cycle(&mut self) -> io::Result<usize> {
        let mut emitted = 0;
        for (level, text) in CYCLE_MESSAGES {
            if self.log(level, format_args!("{text}"))? {
                emitted += 1;
            }
        }
        Ok(emitted)
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
