//! Process diagnostics on stderr via `tracing`.
//!
//! Diagnostics never go to stdout: the emitter's stdout carries only log
//! lines, and the controller's carries only its usage and confirmation.

use std::io::{self, IsTerminal};

use logging::{LevelState, RuntimeLevelFilter};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directive for the controller when `RUST_LOG` is unset.
pub(crate) const CONTROLLER_DEFAULT_FILTER: &str = "warn";

/// Default directive for the emitter when `RUST_LOG` is unset.
pub(crate) const EMITTER_DEFAULT_FILTER: &str = "info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the controller's subscriber. Later calls are ignored.
pub(crate) fn init_controller() {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(CONTROLLER_DEFAULT_FILTER))
        .with(layer)
        .try_init()
        .ok();
}

/// Installs the emitter's subscriber. Later calls are ignored.
///
/// Besides `RUST_LOG`, events must pass the emitter's runtime level, so a
/// controller that disables logging also silences these diagnostics.
pub(crate) fn init_emitter(state: &'static LevelState) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_filter(RuntimeLevelFilter::new(state));

    tracing_subscriber::registry()
        .with(env_filter(EMITTER_DEFAULT_FILTER))
        .with(layer)
        .try_init()
        .ok();
}
