//! crates/logging/src/macros.rs
//! Level-specific logging macros.
//!
//! Each macro takes an [`Emitter`](crate::Emitter) followed by `format!`-style
//! arguments and evaluates to the `io::Result<bool>` of [`Emitter::log`](crate::Emitter::log).

/// Log at [`VerbosityLevel::Error`](crate::VerbosityLevel::Error).
///
/// # Example
/// ```
/// use logging::{Emitter, LevelState, log_error};
///
/// let state = LevelState::new();
/// let mut emitter = Emitter::new(&state, Vec::new());
/// log_error!(emitter, "failed after {} attempts", 3).unwrap();
/// ```
#[macro_export]
macro_rules! log_error {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log($crate::VerbosityLevel::Error, ::std::format_args!($($arg)+))
    };
}

/// Log at [`VerbosityLevel::Warning`](crate::VerbosityLevel::Warning).
#[macro_export]
macro_rules! log_warning {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log($crate::VerbosityLevel::Warning, ::std::format_args!($($arg)+))
    };
}

/// Log at [`VerbosityLevel::Info`](crate::VerbosityLevel::Info).
#[macro_export]
macro_rules! log_info {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log($crate::VerbosityLevel::Info, ::std::format_args!($($arg)+))
    };
}

/// Log at [`VerbosityLevel::Debug`](crate::VerbosityLevel::Debug).
#[macro_export]
macro_rules! log_debug {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log($crate::VerbosityLevel::Debug, ::std::format_args!($($arg)+))
    };
}
