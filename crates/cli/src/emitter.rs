//! `logemitter`: the long-running process whose verbosity is controlled.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::OsStringValueParser, value_parser};
use control::exit_code::ExitCode;
use control::{ProcessId, SharedStateChannel, signal};
use logging::{Emitter, LevelState, VerbosityLevel};

use crate::diagnostics;

/// Default program name used in diagnostics.
pub const EMITTER_PROGRAM_NAME: &str = "logemitter";

/// Pause between cycles when `--interval` is not given.
pub const DEFAULT_INTERVAL_MILLIS: u64 = 5000;

fn clap_command() -> Command {
    Command::new(EMITTER_PROGRAM_NAME)
        .about("Logs one line per level every interval, filtered by a runtime-adjustable level.")
        .disable_version_flag(true)
        .arg(
            Arg::new("channel")
                .long("channel")
                .value_name("PATH")
                .help("Level channel to re-read on notification.")
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("MILLIS")
                .help("Pause between cycles in milliseconds.")
                .default_value("5000")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("cycles")
                .long("cycles")
                .value_name("COUNT")
                .help("Stop after COUNT cycles; 0 runs until killed.")
                .default_value("0")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64)),
        )
}

#[derive(Debug)]
struct EmitterOptions {
    channel: Option<PathBuf>,
    interval: Duration,
    cycles: Option<u64>,
}

impl EmitterOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        let channel = matches.get_one::<OsString>("channel").map(PathBuf::from);
        let interval = matches
            .get_one::<u64>("interval")
            .copied()
            .unwrap_or(DEFAULT_INTERVAL_MILLIS);
        let cycles = matches
            .get_one::<u64>("cycles")
            .copied()
            .filter(|count| *count > 0);
        Self {
            channel,
            interval: Duration::from_millis(interval),
            cycles,
        }
    }
}

/// Runs the emitter until killed, until `--cycles` is reached, or until
/// stdout is closed.
///
/// Returns the process exit code.
pub fn run_emitter<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(EMITTER_PROGRAM_NAME));
    }

    let matches = match clap_command().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(error) => {
            if error.use_stderr() {
                let _ = write!(stderr, "{error}");
                return ExitCode::Usage.as_i32();
            }
            let _ = write!(stdout, "{error}");
            return ExitCode::Ok.as_i32();
        }
    };
    let options = EmitterOptions::from_matches(&matches);

    let state = LevelState::leak();
    state.configure_default();
    diagnostics::init_emitter(state);

    let channel = SharedStateChannel::resolve(options.channel.clone());
    if let Err(error) = signal::install_handler(state, &channel) {
        let _ = writeln!(stderr, "{EMITTER_PROGRAM_NAME}: {error}");
        return ExitCode::Handler.as_i32();
    }

    tracing::info!(
        pid = %ProcessId::current(),
        signal = signal::NOTIFY_SIGNAL_NAME,
        channel = %channel.path().display(),
        "emitter started"
    );

    // Stamps use the offset resolved here, before any thread exists.
    let mut emitter = Emitter::new(state, stdout);
    match emit_cycles(&mut emitter, &options) {
        Ok(()) => ExitCode::Ok.as_i32(),
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed; stopping");
            ExitCode::Ok.as_i32()
        }
        Err(error) => {
            let _ = writeln!(stderr, "{EMITTER_PROGRAM_NAME}: failed to write log line: {error}");
            ExitCode::Output.as_i32()
        }
    }
}

fn emit_cycles<W: Write>(emitter: &mut Emitter<'_, W>, options: &EmitterOptions) -> io::Result<()> {
    let mut observed = emitter.state().current();
    let mut completed = 0u64;

    loop {
        observed = report_level_change(observed, emitter.state().current());
        emitter.run_cycle()?;
        emitter.flush()?;

        completed += 1;
        if options.cycles.is_some_and(|limit| completed >= limit) {
            return Ok(());
        }
        thread::sleep(options.interval);
    }
}

fn report_level_change(previous: VerbosityLevel, current: VerbosityLevel) -> VerbosityLevel {
    if previous != current {
        tracing::info!(from = %previous, to = %current, "verbosity level changed");
    }
    current
}
