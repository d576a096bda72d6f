#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the emitter side of runtime verbosity control: the ordered
//! [`VerbosityLevel`] enumeration, the lock-free [`LevelState`] that a signal
//! handler may overwrite at any instruction boundary, and the [`Emitter`] that
//! filters each call against that state before rendering a [`LogRecord`].
//!
//! # Design
//!
//! A message at level `L` is emitted iff `L <= current`. Setting the level
//! to [`VerbosityLevel::Disabled`] silences the four logging levels. The
//! check is a single atomic load; the clock is only read for calls that pass
//! it. Rendered lines take the form
//! `[YYYY-MM-DD HH:MM:SS] [LEVEL] text` and are written through
//! [`logging_sink::LineSink`].
//!
//! # Invariants
//!
//! - [`LevelState`] only ever stores a valid level discriminant.
//! - Filtering never blocks and never allocates.
//!
//! # Examples
//!
//! ```
//! use logging::{Emitter, LevelState, VerbosityLevel, log_debug, log_warning};
//!
//! let state = LevelState::new();
//! let mut emitter = Emitter::new(&state, Vec::new());
//!
//! state.set(VerbosityLevel::Warning);
//! assert!(log_warning!(emitter, "disk at {}%", 91).unwrap());
//! assert!(!log_debug!(emitter, "hidden").unwrap());
//!
//! let output = String::from_utf8(emitter.into_inner()).unwrap();
//! assert!(output.ends_with("[WARNING] disk at 91%\n"));
//! ```

mod emitter;
mod levels;
mod macros;
mod record;
mod state;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use emitter::{CYCLE_MESSAGES, Emitter};
pub use levels::{ParseLevelError, VerbosityLevel};
pub use record::{LogRecord, TIMESTAMP_FORMAT, local_offset};
pub use state::LevelState;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{RuntimeLevelFilter, verbosity_for};
