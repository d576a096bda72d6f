//! Stub notification support for platforms without Unix signals.

use logging::LevelState;

use super::SendError;
use crate::channel::SharedStateChannel;
use crate::error::ControlError;

/// Name of the notification signal, for diagnostics.
pub const NOTIFY_SIGNAL_NAME: &str = "SIGUSR1";

/// Installed handler (never constructed on this platform).
#[derive(Debug)]
pub struct NotificationHandler {
    _private: (),
}

/// Always fails: there is no asynchronous process notification here.
pub fn install_handler(
    _state: &'static LevelState,
    _channel: &SharedStateChannel,
) -> Result<NotificationHandler, ControlError> {
    Err(ControlError::Unsupported("signal-driven level reload"))
}

pub(crate) fn send_notification(_pid: i32) -> Result<(), SendError> {
    Err(SendError::Unsupported)
}
