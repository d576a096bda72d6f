#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` hosts the two command-line front ends of runtime verbosity control.
//! Both follow the same shape: they accept an argument iterator plus
//! explicit stdout/stderr handles and return a process exit code, so the
//! binaries in `src/bin/` stay thin and tests can drive them in-process.
//!
//! - [`run_emitter`] (`logemitter`) installs the notification handler and
//!   logs one line per level every interval, filtered by the current level.
//! - [`run_controller`] (`setloglevel <level> <pid>`) writes the level token to
//!   the shared channel and notifies the emitter.
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG`. The
//! emitter additionally filters them by its runtime level.
//!
//! # Examples
//!
//! ```
//! use cli::run_controller;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = run_controller(["setloglevel"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 1);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("Usage: setloglevel"));
//! ```

mod controller;
mod diagnostics;
mod emitter;

pub use controller::{CONTROLLER_PROGRAM_NAME, run_controller, run_controller_with_channel};
pub use emitter::{DEFAULT_INTERVAL_MILLIS, EMITTER_PROGRAM_NAME, run_emitter};

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, 255);
    let code = u8::try_from(clamped).unwrap_or(u8::MAX);
    std::process::ExitCode::from(code)
}
