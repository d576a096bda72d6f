//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the runtime verbosity level.
//!
//! [`RuntimeLevelFilter`] is a per-layer [`Filter`] that admits tracing events
//! according to a [`LevelState`], so a process's own diagnostics follow the
//! same level that a controller changes at runtime.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LevelState, RuntimeLevelFilter};
//! use tracing_subscriber::{fmt, prelude::*};
//!
//! let state = LevelState::leak();
//! tracing_subscriber::registry()
//!     .with(fmt::layer().with_filter(RuntimeLevelFilter::new(state)))
//!     .init();
//! ```

use tracing::subscriber::Interest;
use tracing::{Level, Metadata};
use tracing_subscriber::layer::{Context, Filter};

use crate::levels::VerbosityLevel;
use crate::state::LevelState;

/// Maps a tracing level to the verbosity level that admits it.
///
/// `TRACE` has no counterpart and is treated as [`VerbosityLevel::Debug`].
#[must_use]
pub fn verbosity_for(level: &Level) -> VerbosityLevel {
    if *level == Level::ERROR {
        VerbosityLevel::Error
    } else if *level == Level::WARN {
        VerbosityLevel::Warning
    } else if *level == Level::INFO {
        VerbosityLevel::Info
    } else {
        VerbosityLevel::Debug
    }
}

/// Per-layer filter driven by a runtime [`LevelState`].
#[derive(Clone, Copy, Debug)]
pub struct RuntimeLevelFilter {
    state: &'static LevelState,
}

impl RuntimeLevelFilter {
    /// Creates a filter consulting `state` on every event.
    #[must_use]
    pub const fn new(state: &'static LevelState) -> Self {
        Self { state }
    }
}

impl<S> Filter<S> for RuntimeLevelFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.state.allows(verbosity_for(meta.level()))
    }

    // The level can change at any time, so callsites must never be cached.
    fn callsite_enabled(&self, _meta: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::{Layer, fmt, layer::SubscriberExt};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn tracing_levels_map_onto_verbosity() {
        assert_eq!(verbosity_for(&Level::ERROR), VerbosityLevel::Error);
        assert_eq!(verbosity_for(&Level::WARN), VerbosityLevel::Warning);
        assert_eq!(verbosity_for(&Level::INFO), VerbosityLevel::Info);
        assert_eq!(verbosity_for(&Level::DEBUG), VerbosityLevel::Debug);
        assert_eq!(verbosity_for(&Level::TRACE), VerbosityLevel::Debug);
    }

    #[test]
    fn filter_follows_runtime_level() {
        let state = LevelState::leak();
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .with_filter(RuntimeLevelFilter::new(state)),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("first debug");
            state.set(VerbosityLevel::Warning);
            tracing::debug!("second debug");
            tracing::info!("hidden info");
            tracing::warn!("visible warning");
            state.set(VerbosityLevel::Disabled);
            tracing::error!("silenced error");
        });

        let text = captured.text();
        assert!(text.contains("first debug"));
        assert!(!text.contains("second debug"));
        assert!(!text.contains("hidden info"));
        assert!(text.contains("visible warning"));
        assert!(!text.contains("silenced error"));
    }
}
