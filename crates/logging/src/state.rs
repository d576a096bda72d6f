//! crates/logging/src/state.rs
//! Lock-free holder for the process-wide current verbosity level.
//!
//! The level is read on every log call and overwritten from an asynchronous
//! signal handler, so it lives in a single [`AtomicU8`]. Loads and stores are
//! single machine instructions: a reader can never observe a torn value and
//! the writer never waits on a lock held by the code it interrupted.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::levels::VerbosityLevel;

/// The current verbosity level of an emitter process.
#[derive(Debug)]
pub struct LevelState {
    raw: AtomicU8,
}

impl LevelState {
    /// Creates a state holding the most permissive level, [`VerbosityLevel::Debug`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_level(VerbosityLevel::Debug)
    }

    /// Creates a state holding `level`.
    #[must_use]
    pub const fn with_level(level: VerbosityLevel) -> Self {
        Self {
            raw: AtomicU8::new(level.as_u8()),
        }
    }

    /// Returns the current level.
    #[inline]
    #[must_use]
    pub fn current(&self) -> VerbosityLevel {
        // Only valid discriminants are ever stored.
        VerbosityLevel::from_u8(self.raw.load(Ordering::Acquire)).unwrap_or(VerbosityLevel::Debug)
    }

    /// Overwrites the current level.
    #[inline]
    pub fn set(&self, level: VerbosityLevel) {
        self.raw.store(level.as_u8(), Ordering::Release);
    }

    /// Resets the level to [`VerbosityLevel::Debug`].
    pub fn configure_default(&self) {
        self.set(VerbosityLevel::Debug);
    }

    /// Reports whether a message at `level` would currently be emitted.
    #[inline]
    #[must_use]
    pub fn allows(&self, level: VerbosityLevel) -> bool {
        self.current().admits(level)
    }

    /// Leaks a fresh state to obtain the `'static` reference a signal handler needs.
    ///
    /// Only one state is expected per process; it lives until exit.
    #[must_use]
    pub fn leak() -> &'static Self {
        Box::leak(Box::new(Self::new()))
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}
