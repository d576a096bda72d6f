//! The controller's two-step level change: write the token, then notify.

use std::ffi::OsStr;

use crate::channel::SharedStateChannel;
use crate::error::ControlError;
use crate::notify::{ProcessId, notify};

/// Writes `level` to `channel` and notifies `pid`.
///
/// `level` is written verbatim, even when it is not a known token; the
/// emitter's handler ignores unknown tokens. If the write fails nothing is
/// sent. If sending fails the written token stays in place, and the next
/// successful notification applies it.
pub fn request_level_change(
    channel: &SharedStateChannel,
    level: impl AsRef<OsStr>,
    pid: ProcessId,
) -> Result<(), ControlError> {
    let level = level.as_ref();
    channel.write_token(level)?;
    notify(pid)?;
    tracing::info!(level = %level.to_string_lossy(), %pid, "level change requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_failure_skips_notification() {
        let dir = tempdir().unwrap();
        let channel = SharedStateChannel::new(dir.path().join("no-such-dir").join("level"));
        // Would fail with Notify if it were attempted.
        let pid = ProcessId::new(ProcessId::MAX - 7).unwrap();

        let err = request_level_change(&channel, "info", pid).unwrap_err();
        assert!(matches!(err, ControlError::OpenChannel { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failed_notification_keeps_written_token() {
        let dir = tempdir().unwrap();
        let channel = SharedStateChannel::new(dir.path().join("level"));
        let pid = ProcessId::new(ProcessId::MAX - 7).unwrap();

        let err = request_level_change(&channel, "warning", pid).unwrap_err();
        assert!(matches!(err, ControlError::Notify { .. }));
        assert_eq!(
            channel.read_contents().unwrap().as_deref(),
            Some("warning\n")
        );
    }
}
