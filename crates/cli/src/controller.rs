//! `setloglevel <level> <pid>`: the level controller front end.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use control::exit_code::{ExitCode, HasExitCode};
use control::{ControlError, ProcessId, SharedStateChannel, request_level_change};

use crate::diagnostics;

/// Default program name used in the usage line.
pub const CONTROLLER_PROGRAM_NAME: &str = "setloglevel";

fn program_name(args: &[OsString]) -> String {
    args.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map_or_else(
            || CONTROLLER_PROGRAM_NAME.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
}

fn write_usage<Out: Write>(program: &str, stdout: &mut Out) {
    let _ = writeln!(
        stdout,
        "Usage: {program} <disable|error|warning|info|debug> <logger_pid>"
    );
}

/// Runs the controller, resolving the channel from the environment.
///
/// Returns the process exit code.
pub fn run_controller<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    diagnostics::init_controller();
    run_controller_with_channel(arguments, &SharedStateChannel::resolve(None), stdout, stderr)
}

/// Runs the controller against an explicit channel.
///
/// The argument vector must hold exactly the program name and two operands.
/// Nothing is interpreted as an option, so `--` counts as an operand. The
/// level is written as raw bytes without validation.
///
/// Unlike a bare argument-count check, the pid must also be a positive
/// integer, since `0` or a negative value would signal a whole process
/// group. This deliberate deviation is reported as a usage error before the
/// channel is touched.
pub fn run_controller_with_channel<I, S, Out, Err>(
    arguments: I,
    channel: &SharedStateChannel,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    let program = program_name(&args);

    let [_, level, pid_text] = args.as_slice() else {
        tracing::debug!(count = args.len(), "wrong argument count");
        write_usage(&program, stdout);
        return ExitCode::Usage.as_i32();
    };

    let pid = match pid_text.to_string_lossy().parse::<ProcessId>() {
        Ok(pid) => pid,
        Err(error) => {
            let _ = writeln!(stderr, "{program}: {error}");
            write_usage(&program, stdout);
            return error.exit_code().as_i32();
        }
    };

    match request_level_change(channel, level, pid) {
        Ok(()) => {
            let _ = writeln!(stdout, "Log level changed to {}", level.to_string_lossy());
            ExitCode::Ok.as_i32()
        }
        Err(error) => report_failure(&program, &error, stderr),
    }
}

fn report_failure<Err: Write>(program: &str, error: &ControlError, stderr: &mut Err) -> i32 {
    tracing::warn!(%error, "level change failed");
    let _ = writeln!(stderr, "{program}: {error}");
    error.exit_code().as_i32()
}
