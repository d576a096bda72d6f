//! crates/logging/src/levels.rs
//! The ordered verbosity enumeration shared by the emitter and controller.

use std::fmt;
use std::str::FromStr;

/// Ordered verbosity levels.
///
/// A higher discriminant is more verbose and admits every message of the
/// lower levels. The discriminants are part of the contract: they are the
/// raw values stored in [`LevelState`](crate::LevelState).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum VerbosityLevel {
    /// Suppresses all messages.
    #[cfg_attr(feature = "serde", serde(rename = "disable"))]
    Disabled = 0,
    /// Error messages only.
    Error = 1,
    /// Errors and warnings.
    Warning = 2,
    /// Errors, warnings and informational messages.
    Info = 3,
    /// Everything.
    Debug = 4,
}

impl VerbosityLevel {
    /// All levels in ascending verbosity order.
    pub const ALL: [Self; 5] = [
        Self::Disabled,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
    ];

    /// Upper-case name used in rendered log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "DISABLED",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Lower-case token written to the shared level channel.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Disabled => "disable",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Raw value stored in the atomic level word.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a raw level word back to a level.
    ///
    /// Returns `None` for values outside `0..=4`.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Disabled),
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Reports whether a message at `message` level passes a threshold of `self`.
    ///
    /// The rule is purely numeric: `message <= self`.
    #[must_use]
    pub const fn admits(self, message: Self) -> bool {
        message.as_u8() <= self.as_u8()
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the five channel tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLevelError {
    token: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown verbosity level '{}' (expected disable, error, warning, info or debug)",
            self.token
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for VerbosityLevel {
    type Err = ParseLevelError;

    /// Parses a channel token exactly; no case folding or trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.token() == s)
            .ok_or_else(|| ParseLevelError {
                token: s.to_owned(),
            })
    }
}
