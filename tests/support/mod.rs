//! Shared helpers for driving the built binaries.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Cycle interval used by spawned emitters.
pub const INTERVAL_MILLIS: u64 = 50;

/// Time allowed for a notification to take effect and any partial cycle to pass.
pub const SETTLE: Duration = Duration::from_millis(300);

/// Window over which steady-state output is sampled.
pub const SAMPLE: Duration = Duration::from_millis(500);

pub const EMITTER: &str = env!("CARGO_BIN_EXE_logemitter");
pub const CONTROLLER: &str = env!("CARGO_BIN_EXE_setloglevel");

fn forward_lines<R: Read + Send + 'static>(reader: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// A running `logemitter` whose output is collected line by line.
pub struct EmitterProcess {
    child: Child,
    stdout: Receiver<String>,
    stderr: Receiver<String>,
}

impl EmitterProcess {
    /// Spawns the emitter against `channel` and waits for its first line.
    pub fn spawn(channel: &Path) -> Self {
        let mut child = Command::new(EMITTER)
            .arg("--channel")
            .arg(channel)
            .arg("--interval")
            .arg(INTERVAL_MILLIS.to_string())
            .env("RUST_LOG", "info")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn logemitter");

        let stdout = forward_lines(child.stdout.take().expect("piped stdout"));
        let stderr = forward_lines(child.stderr.take().expect("piped stderr"));
        let process = Self {
            child,
            stdout,
            stderr,
        };

        // The handler is installed before the first cycle is written.
        let first = process.stdout.recv_timeout(Duration::from_secs(10));
        assert!(first.is_ok(), "emitter produced no output: {first:?}");
        process
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Waits for a notification to settle, then returns the lines emitted
    /// during the following sample window.
    pub fn settled_lines(&self) -> Vec<String> {
        thread::sleep(SETTLE);
        self.drain_stdout();
        thread::sleep(SAMPLE);
        self.drain_stdout()
    }

    /// Returns every stdout line received so far.
    pub fn drain_stdout(&self) -> Vec<String> {
        self.stdout.try_iter().collect()
    }

    /// Waits until a stderr line contains `needle`.
    pub fn wait_for_stderr(&self, needle: &str) -> Option<String> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.stderr.recv_timeout(remaining) {
                Ok(line) if line.contains(needle) => return Some(line),
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Returns `true` while the process has not exited.
    pub fn is_running(&mut self) -> bool {
        self.child.try_wait().expect("poll emitter").is_none()
    }
}

impl Drop for EmitterProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Counts lines carrying `[LEVEL]`.
pub fn count_level(lines: &[String], level: &str) -> usize {
    let tag = format!("[{level}]");
    lines.iter().filter(|line| line.contains(&tag)).count()
}

/// Sends the notification signal directly, bypassing the controller.
#[cfg(unix)]
pub fn send_notification(pid: u32) {
    let pid = libc::pid_t::try_from(pid).expect("pid fits pid_t");
    // SAFETY: kill has no memory-safety preconditions.
    let result = unsafe { libc::kill(pid, libc::SIGUSR1) };
    assert_eq!(result, 0, "kill failed: {}", std::io::Error::last_os_error());
}
