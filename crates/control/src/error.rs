//! Error type shared by the controller and emitter front ends.

use std::io;
use std::path::PathBuf;

use crate::exit_code::{ExitCode, HasExitCode};

/// Failures of the level-control protocol.
///
/// Unknown level tokens are deliberately absent: the handler ignores them
/// and the controller writes them unchecked.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The shared level channel could not be opened for writing.
    #[error("failed to open level channel {}: {source}", .path.display())]
    OpenChannel {
        /// Channel location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The token could not be written to an opened channel.
    #[error("failed to write level channel {}: {source}", .path.display())]
    WriteChannel {
        /// Channel location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The channel path cannot be passed to the operating system.
    #[error("level channel path {} contains a NUL byte", .0.display())]
    InvalidPath(PathBuf),

    /// A process identifier was not a positive integer.
    #[error("invalid process id '{0}': expected a positive integer")]
    InvalidPid(String),

    /// The notification signal could not be delivered.
    #[error("failed to send signal to process {pid}: {source}")]
    Notify {
        /// Target process.
        pid: i32,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The notification handler could not be registered.
    #[error("failed to install notification handler: {0}")]
    InstallHandler(#[source] io::Error),

    /// The platform has no process-targeted notification primitive.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

impl HasExitCode for ControlError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::OpenChannel { .. } | Self::WriteChannel { .. } | Self::InvalidPath(_) => {
                ExitCode::ChannelIo
            }
            Self::InvalidPid(_) => ExitCode::Usage,
            Self::Notify { .. } => ExitCode::Notify,
            Self::InstallHandler(_) | Self::Unsupported(_) => ExitCode::Handler,
        }
    }
}
