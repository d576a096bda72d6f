//! Notification delivery and the handler that applies it.
//!
//! # Safety
//!
//! This module uses unsafe code to install a Unix signal handler and send
//! signals via libc. The handler is async-signal-safe: it performs raw
//! `open`/`read`/`close` into a fixed stack buffer and a single atomic store.
#![allow(unsafe_code)]
//!
//! # Protocol
//!
//! The controller rewrites the channel and then sends `SIGUSR1` to the
//! emitter. The emitter's handler re-reads the first channel line and, when
//! it is exactly one of the five level tokens, overwrites the process-wide
//! [`LevelState`](logging::LevelState). Anything else leaves the level
//! unchanged. A missing channel is reported on stderr and otherwise ignored.
//!
//! The handler is registered with `SA_RESTART`, so blocking calls in the
//! emitter's main loop resume instead of failing with `EINTR`. Handlers are
//! never uninstalled; the state and path they reference live until exit.
//!
//! # Platform Support
//!
//! - **Unix**: full support.
//! - **Other**: [`install_handler`] and sending fail with
//!   [`ControlError::Unsupported`](crate::ControlError::Unsupported).

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{
    NOTIFY_SIGNAL_NAME, NotificationHandler, RefreshOutcome, install_handler,
    refresh_from_channel,
};
#[cfg(unix)]
pub(crate) use unix::send_notification;

#[cfg(not(unix))]
mod stub;
#[cfg(not(unix))]
pub use stub::{NOTIFY_SIGNAL_NAME, NotificationHandler, install_handler};
#[cfg(not(unix))]
pub(crate) use stub::send_notification;

/// Failure of the raw send step, before it is attributed to a pid.
#[derive(Debug)]
pub(crate) enum SendError {
    /// No notification primitive on this platform.
    #[cfg_attr(unix, allow(dead_code))]
    Unsupported,
    /// The OS rejected the send.
    #[cfg_attr(not(unix), allow(dead_code))]
    Os(std::io::Error),
}
