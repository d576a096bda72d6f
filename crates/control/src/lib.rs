#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `control` implements the cross-process half of runtime verbosity control:
//! the shared level channel, the payload-less `SIGUSR1` notification, the
//! async-signal-safe handler that applies a new level inside the emitter,
//! and the controller's write-then-notify operation.
//!
//! # Design
//!
//! - [`SharedStateChannel`] is a single overwritable token line at a known
//!   path (see [`config`]). Writes truncate; there is no locking.
//! - [`notify`] sends the notification to a validated [`ProcessId`].
//! - [`signal::install_handler`] registers a handler that re-reads the channel
//!   and overwrites the emitter's [`LevelState`](logging::LevelState) with one
//!   atomic store.
//! - [`request_level_change`] is the controller: write, then notify, with no
//!   rollback of the write when notification fails.
//!
//! # Errors
//!
//! All failures are [`ControlError`] values carrying an
//! [`ExitCode`](exit_code::ExitCode) through [`HasExitCode`](exit_code::HasExitCode).
//! Unknown tokens are not errors anywhere.
//!
//! # Examples
//!
//! ```no_run
//! use control::{ProcessId, SharedStateChannel, request_level_change};
//!
//! let channel = SharedStateChannel::resolve(None);
//! let pid: ProcessId = "4242".parse()?;
//! request_level_change(&channel, "warning", pid)?;
//! # Ok::<(), control::ControlError>(())
//! ```

mod channel;
pub mod config;
mod controller;
mod error;
pub mod exit_code;
mod notify;
pub mod signal;

pub use channel::{MAX_TOKEN_LINE, SharedStateChannel, match_token};
pub use controller::request_level_change;
pub use error::ControlError;
pub use notify::{ProcessId, notify};
