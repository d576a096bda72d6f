//! Process identifiers and the notification send step.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::ControlError;
use crate::signal;

/// Identifier of an emitter process.
///
/// Always positive, so a notification can never be broadcast to a process
/// group (`0`) or to every process (`-1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessId(NonZeroU32);

impl ProcessId {
    /// Largest identifier accepted; matches the platform's signed `pid_t`.
    pub const MAX: u32 = i32::MAX as u32;

    /// Creates an identifier, rejecting zero and values above [`ProcessId::MAX`].
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        if raw > Self::MAX {
            return None;
        }
        NonZeroU32::new(raw).map(Self)
    }

    /// Identifier of the calling process.
    #[must_use]
    pub fn current() -> Self {
        Self::new(std::process::id()).unwrap_or(Self(NonZeroU32::MIN))
    }

    /// The identifier as the signed value the OS expects.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0.get() as i32
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProcessId {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ControlError::InvalidPid(s.to_owned()))
    }
}

/// Sends the payload-less notification to `pid`.
///
/// Fails when the process does not exist or may not be signalled. Nothing
/// is retried.
pub fn notify(pid: ProcessId) -> Result<(), ControlError> {
    signal::send_notification(pid.as_raw()).map_err(|source| match source {
        signal::SendError::Unsupported => ControlError::Unsupported("process notification"),
        signal::SendError::Os(source) => ControlError::Notify {
            pid: pid.as_raw(),
            source,
        },
    })?;
    tracing::debug!(pid = pid.as_raw(), "notification sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        let pid: ProcessId = "1234".parse().unwrap();
        assert_eq!(pid.as_raw(), 1234);
        assert_eq!(pid.to_string(), "1234");
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for input in ["0", "-1", "-42", "", "12ab", " 7", "4294967295", "2147483648"] {
            let err = input.parse::<ProcessId>().unwrap_err();
            assert!(
                matches!(err, ControlError::InvalidPid(ref s) if s == input),
                "{input:?}"
            );
        }
    }

    #[test]
    fn accepts_platform_maximum() {
        let pid: ProcessId = "2147483647".parse().unwrap();
        assert_eq!(pid.as_raw(), i32::MAX);
    }

    #[test]
    fn current_matches_std() {
        assert_eq!(ProcessId::current().as_raw() as u32, std::process::id());
    }

    #[cfg(unix)]
    #[test]
    fn notify_nonexistent_process_fails() {
        // Above every default pid_max.
        let pid = ProcessId::new(ProcessId::MAX - 7).unwrap();
        let err = notify(pid).unwrap_err();
        assert!(matches!(err, ControlError::Notify { pid: p, .. } if p == pid.as_raw()));
    }
}
