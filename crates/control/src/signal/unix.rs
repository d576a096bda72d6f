//! Unix notification handler implementation.
//!
//! The handler runs at arbitrary interruption points of the emitter, so it
//! only uses async-signal-safe calls, reads into a stack buffer, and touches
//! no state shared with interrupted code other than the atomic level word.

use std::ffi::{CStr, CString, c_char, c_int};
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use logging::{LevelState, VerbosityLevel};

use super::SendError;
use crate::channel::{MAX_TOKEN_LINE, SharedStateChannel, match_token};
use crate::error::ControlError;

/// Signal used as the notification.
const NOTIFY_SIGNAL: c_int = libc::SIGUSR1;

/// Name of the notification signal, for diagnostics.
pub const NOTIFY_SIGNAL_NAME: &str = "SIGUSR1";

/// Level state updated by the handler. Points at a leaked `'static` value.
static TARGET_STATE: AtomicPtr<LevelState> = AtomicPtr::new(ptr::null_mut());

/// NUL-terminated channel path read by the handler. Leaked, never freed.
static CHANNEL_PATH: AtomicPtr<c_char> = AtomicPtr::new(ptr::null_mut());

/// Result of one channel refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The channel named a level, which is now current.
    Updated(VerbosityLevel),
    /// The channel was read but its first line is not a level token.
    Unrecognized,
    /// The channel could not be opened; carries `errno`.
    Unavailable(c_int),
}

/// Registration of the notification handler.
///
/// Dropping this value does not restore the previous disposition; once
/// installed, the handler stays active for the lifetime of the process.
#[derive(Debug)]
pub struct NotificationHandler {
    _private: (),
}

/// Reads the channel at `path` and applies a recognised token to `state`.
///
/// Only the first line counts, and only its first [`MAX_TOKEN_LINE`] bytes.
/// Read errors after a successful open are treated like an empty line.
/// Async-signal-safe: no allocation, no locks.
pub fn refresh_from_channel(state: &LevelState, path: &CStr) -> RefreshOutcome {
    let mut line = [0u8; MAX_TOKEN_LINE + 1];
    let len = match read_first_line(path, &mut line) {
        Ok(len) => len,
        Err(errno) => return RefreshOutcome::Unavailable(errno),
    };

    match match_token(&line[..len]) {
        Some(level) => {
            state.set(level);
            RefreshOutcome::Updated(level)
        }
        None => RefreshOutcome::Unrecognized,
    }
}

fn read_first_line(path: &CStr, buf: &mut [u8; MAX_TOKEN_LINE + 1]) -> Result<usize, c_int> {
    // SAFETY: `path` is NUL-terminated.
    let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC) };
    if fd < 0 {
        return Err(last_errno());
    }

    let mut filled = 0;
    while filled < MAX_TOKEN_LINE {
        let remaining = &mut buf[filled..MAX_TOKEN_LINE];
        // SAFETY: `remaining` is a valid writable region of the given length.
        let n = unsafe { libc::read(fd, remaining.as_mut_ptr().cast(), remaining.len()) };
        if n < 0 {
            if last_errno() == libc::EINTR {
                continue;
            }
            filled = 0;
            break;
        }
        if n == 0 {
            break;
        }
        let end = filled + n as usize;
        if let Some(pos) = buf[filled..end].iter().position(|&b| b == b'\n') {
            filled += pos + 1;
            break;
        }
        filled = end;
    }

    // SAFETY: `fd` was opened above and is closed exactly once.
    unsafe { libc::close(fd) };
    Ok(filled)
}

extern "C" fn handle_notification(_signum: c_int) {
    let _errno = ErrnoGuard::save();

    let state = TARGET_STATE.load(Ordering::Acquire);
    let path = CHANNEL_PATH.load(Ordering::Acquire);
    if state.is_null() || path.is_null() {
        return;
    }

    // SAFETY: both pointers were published by `install_handler` from leaked
    // allocations that are never freed.
    let (state, path) = unsafe { (&*state, CStr::from_ptr(path)) };

    if let RefreshOutcome::Unavailable(errno) = refresh_from_channel(state, path) {
        report_unavailable(errno);
    }
}

/// Writes a fixed diagnostic plus the errno value to stderr with `write(2)`.
fn report_unavailable(errno: c_int) {
    const PREFIX: &[u8] = b"failed to open log level channel (os error ";
    const SUFFIX: &[u8] = b"); level unchanged\n";

    let mut digits = [0u8; 12];
    let mut buf = [0u8; 80];
    let mut len = 0;
    for part in [PREFIX, format_decimal(errno, &mut digits), SUFFIX] {
        buf[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }

    // SAFETY: `buf[..len]` is initialised; a short or failed write is ignored.
    unsafe { libc::write(libc::STDERR_FILENO, buf.as_ptr().cast(), len) };
}

fn format_decimal(value: c_int, scratch: &mut [u8; 12]) -> &[u8] {
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut start = scratch.len();
    loop {
        start -= 1;
        scratch[start] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    if negative {
        start -= 1;
        scratch[start] = b'-';
    }
    &scratch[start..]
}

/// Registers the notification handler for `state`, reading `channel`.
///
/// Calling this again retargets the handler; earlier paths are leaked
/// because a handler may still be reading them.
pub fn install_handler(
    state: &'static LevelState,
    channel: &SharedStateChannel,
) -> Result<NotificationHandler, ControlError> {
    let path: CString = channel.c_path()?;
    CHANNEL_PATH.store(path.into_raw(), Ordering::Release);
    TARGET_STATE.store(ptr::from_ref(state).cast_mut(), Ordering::Release);

    // SAFETY: the sigaction struct is fully initialised before use and the
    // handler only performs async-signal-safe operations.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_notification as extern "C" fn(c_int) as libc::sighandler_t;
        action.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut action.sa_mask);

        if libc::sigaction(NOTIFY_SIGNAL, &raw const action, ptr::null_mut()) != 0 {
            return Err(ControlError::InstallHandler(io::Error::last_os_error()));
        }
    }

    tracing::debug!(
        signal = NOTIFY_SIGNAL_NAME,
        channel = %channel.path().display(),
        "notification handler installed"
    );
    Ok(NotificationHandler { _private: () })
}

pub(crate) fn send_notification(pid: i32) -> Result<(), SendError> {
    // SAFETY: kill has no memory-safety preconditions; pid is positive.
    if unsafe { libc::kill(pid, NOTIFY_SIGNAL) } == -1 {
        return Err(SendError::Os(io::Error::last_os_error()));
    }
    Ok(())
}

fn last_errno() -> c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Restores `errno` on drop so the interrupted code never sees the handler's value.
struct ErrnoGuard(c_int);

impl ErrnoGuard {
    fn save() -> Self {
        Self(last_errno())
    }
}

impl Drop for ErrnoGuard {
    fn drop(&mut self) {
        if let Some(location) = errno_location() {
            // SAFETY: the location is the calling thread's errno.
            unsafe { *location = self.0 };
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "emscripten"))]
fn errno_location() -> Option<*mut c_int> {
    // SAFETY: always returns the thread's errno.
    Some(unsafe { libc::__errno_location() })
}

#[cfg(target_os = "android")]
fn errno_location() -> Option<*mut c_int> {
    // SAFETY: always returns the thread's errno.
    Some(unsafe { libc::__errno() })
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
fn errno_location() -> Option<*mut c_int> {
    // SAFETY: always returns the thread's errno.
    Some(unsafe { libc::__error() })
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "emscripten",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
fn errno_location() -> Option<*mut c_int> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn c_path(path: &std::path::Path) -> CString {
        SharedStateChannel::new(path).c_path().unwrap()
    }

    #[test]
    fn recognised_token_updates_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level");
        fs::write(&path, "info\n").unwrap();

        let state = LevelState::new();
        let outcome = refresh_from_channel(&state, &c_path(&path));
        assert_eq!(outcome, RefreshOutcome::Updated(VerbosityLevel::Info));
        assert_eq!(state.current(), VerbosityLevel::Info);
    }

    #[test]
    fn unknown_token_keeps_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level");
        fs::write(&path, "verbose\n").unwrap();

        let state = LevelState::with_level(VerbosityLevel::Warning);
        let outcome = refresh_from_channel(&state, &c_path(&path));
        assert_eq!(outcome, RefreshOutcome::Unrecognized);
        assert_eq!(state.current(), VerbosityLevel::Warning);
    }

    #[test]
    fn missing_newline_is_not_a_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level");
        fs::write(&path, "error").unwrap();

        let state = LevelState::new();
        assert_eq!(
            refresh_from_channel(&state, &c_path(&path)),
            RefreshOutcome::Unrecognized
        );
        assert_eq!(state.current(), VerbosityLevel::Debug);
    }

    #[test]
    fn missing_channel_is_unavailable() {
        let dir = tempdir().unwrap();
        let state = LevelState::with_level(VerbosityLevel::Error);
        let outcome = refresh_from_channel(&state, &c_path(&dir.path().join("absent")));
        assert_eq!(outcome, RefreshOutcome::Unavailable(libc::ENOENT));
        assert_eq!(state.current(), VerbosityLevel::Error);
    }

    #[test]
    fn only_first_line_is_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level");
        fs::write(&path, "disable\ndebug\n").unwrap();

        let state = LevelState::new();
        assert_eq!(
            refresh_from_channel(&state, &c_path(&path)),
            RefreshOutcome::Updated(VerbosityLevel::Disabled)
        );
    }

    #[test]
    fn overlong_line_is_truncated_and_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level");
        fs::write(&path, "debugdebugdebugdebug\n").unwrap();

        let state = LevelState::with_level(VerbosityLevel::Info);
        assert_eq!(
            refresh_from_channel(&state, &c_path(&path)),
            RefreshOutcome::Unrecognized
        );
        assert_eq!(state.current(), VerbosityLevel::Info);
    }

    #[test]
    fn format_decimal_handles_sign_and_zero() {
        assert_eq!(format_decimal(0, &mut [0; 12]), b"0");
        assert_eq!(format_decimal(2, &mut [0; 12]), b"2");
        assert_eq!(format_decimal(-13, &mut [0; 12]), b"-13");
        assert_eq!(format_decimal(c_int::MIN, &mut [0; 12]), b"-2147483648");
    }
}
