//! The shared level channel: one overwritable token line at a known path.
//!
//! Writers truncate and rewrite the whole file; readers take the first line.
//! There is no locking between the two. A read racing a write may see an
//! empty, truncated or stale token, and the reader's policy of ignoring
//! anything it does not recognise is the only mitigation.

use std::ffi::{CString, OsStr};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use logging::VerbosityLevel;

use crate::config;
use crate::error::ControlError;

/// Maximum bytes of a token line the handler considers, newline included.
pub const MAX_TOKEN_LINE: usize = 15;

/// Matches a raw channel line against the five level tokens.
///
/// The comparison is exact and case-sensitive and requires the trailing
/// newline written by the controller: `b"info\n"` matches, `b"info"`,
/// `b"info \n"` and `b"info\r\n"` do not. Allocation-free, so it is safe to
/// call from a signal handler.
#[must_use]
pub fn match_token(line: &[u8]) -> Option<VerbosityLevel> {
    let (&last, body) = line.split_last()?;
    if last != b'\n' {
        return None;
    }
    VerbosityLevel::ALL
        .into_iter()
        .find(|level| level.token().as_bytes() == body)
}

/// Location of the shared level token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedStateChannel {
    path: PathBuf,
}

impl SharedStateChannel {
    /// Creates a channel at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a channel at the configured location.
    ///
    /// See [`config::resolve_channel_path`].
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::new(config::resolve_channel_path(explicit))
    }

    /// Channel location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the channel with `token` followed by a newline.
    ///
    /// The token bytes are written as given, even when they are not UTF-8;
    /// validating them is the reader's job.
    pub fn write_token(&self, token: impl AsRef<OsStr>) -> Result<(), ControlError> {
        let token = token.as_ref();
        let mut file = File::create(&self.path).map_err(|source| ControlError::OpenChannel {
            path: self.path.clone(),
            source,
        })?;

        let bytes = token.as_encoded_bytes();
        let mut line = Vec::with_capacity(bytes.len() + 1);
        line.extend_from_slice(bytes);
        line.push(b'\n');

        file.write_all(&line)
            .and_then(|()| file.sync_all())
            .map_err(|source| ControlError::WriteChannel {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            token = %token.to_string_lossy(),
            "level token written"
        );
        Ok(())
    }

    /// Reads the whole channel contents.
    ///
    /// Returns `Ok(None)` when the channel has never been written.
    pub fn read_contents(&self) -> std::io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Converts the path into the NUL-terminated form the handler reads.
    #[cfg_attr(not(unix), allow(dead_code))]
    pub(crate) fn c_path(&self) -> Result<CString, ControlError> {
        #[cfg(unix)]
        let bytes = {
            use std::os::unix::ffi::OsStrExt;
            self.path.as_os_str().as_bytes().to_vec()
        };
        #[cfg(not(unix))]
        let bytes = self.path.to_string_lossy().into_owned().into_bytes();

        CString::new(bytes).map_err(|_| ControlError::InvalidPath(self.path.clone()))
    }
}
