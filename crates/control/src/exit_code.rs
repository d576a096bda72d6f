//! Centralized exit code definitions for the emitter and controller processes.
//!
//! Every failure class in the level-control protocol terminates the process
//! that hit it, so each maps to one non-zero code here. Malformed level
//! tokens are the exception: they are ignored and never produce a code.
//!
//! # Examples
//!
//! ```
//! use control::exit_code::ExitCode;
//!
//! let code = ExitCode::Notify;
//! assert_eq!(code.as_i32(), 3);
//! assert_eq!(code.description(), "notification delivery failed");
//! ```

use std::fmt;

/// Exit codes returned by the emitter and controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// Wrong argument count or an unusable argument.
    ///
    /// The controller prints its usage line before exiting with this code.
    Usage = 1,

    /// The shared level channel could not be opened or written.
    ///
    /// Returned by the controller before any notification is attempted.
    ChannelIo = 2,

    /// The notification could not be delivered to the target process.
    ///
    /// The channel write that preceded it is not rolled back.
    Notify = 3,

    /// The notification handler could not be installed at emitter startup.
    Handler = 4,

    /// The emitter could not write its log output.
    ///
    /// A closed stdout is not an error; the emitter stops with [`ExitCode::Ok`].
    Output = 5,
}

impl ExitCode {
    /// Returns the numeric process status.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Usage => "usage error",
            Self::ChannelIo => "level channel I/O error",
            Self::Notify => "notification delivery failed",
            Self::Handler => "notification handler installation failed",
            Self::Output => "log output write failed",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Types that determine the status their process should exit with.
pub trait HasExitCode {
    /// The exit code for this value.
    fn exit_code(&self) -> ExitCode;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ExitCode; 6] = [
        ExitCode::Ok,
        ExitCode::Usage,
        ExitCode::ChannelIo,
        ExitCode::Notify,
        ExitCode::Handler,
        ExitCode::Output,
    ];

    #[test]
    fn codes_are_distinct_and_only_ok_is_zero() {
        for (index, code) in ALL.iter().enumerate() {
            assert_eq!(code.as_i32(), index as i32);
        }
    }

    #[test]
    fn display_uses_description() {
        assert_eq!(ExitCode::Usage.to_string(), "usage error");
        assert_eq!(ExitCode::Output.to_string(), "log output write failed");
    }
}
