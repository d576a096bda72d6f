//! Channel location configuration.
//!
//! Both processes must agree on where the level token lives. Resolution order
//! is an explicit path, then [`CHANNEL_ENV`], then [`DEFAULT_CHANNEL_PATH`].

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Well-known location of the shared level token.
pub const DEFAULT_CHANNEL_PATH: &str = "/tmp/log_level.txt";

/// Environment variable overriding [`DEFAULT_CHANNEL_PATH`].
pub const CHANNEL_ENV: &str = "LOGLEVEL_CHANNEL";

/// Resolves the channel path using the process environment.
#[must_use]
pub fn resolve_channel_path(explicit: Option<PathBuf>) -> PathBuf {
    resolve_with(explicit, env::var_os(CHANNEL_ENV))
}

/// Resolves the channel path from explicitly supplied sources.
///
/// Empty values are treated as unset.
#[must_use]
pub fn resolve_with(explicit: Option<PathBuf>, env_value: Option<OsString>) -> PathBuf {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CHANNEL_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_with(
            Some(PathBuf::from("/run/a")),
            Some(OsString::from("/run/b")),
        );
        assert_eq!(path, PathBuf::from("/run/a"));
    }

    #[test]
    fn environment_is_second() {
        let path = resolve_with(None, Some(OsString::from("/run/b")));
        assert_eq!(path, PathBuf::from("/run/b"));
    }

    #[test]
    fn default_when_nothing_set() {
        assert_eq!(resolve_with(None, None), PathBuf::from(DEFAULT_CHANNEL_PATH));
    }

    #[test]
    fn empty_values_are_ignored() {
        let path = resolve_with(Some(PathBuf::new()), Some(OsString::new()));
        assert_eq!(path, PathBuf::from(DEFAULT_CHANNEL_PATH));
    }
}
