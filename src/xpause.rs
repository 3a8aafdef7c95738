// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind as ClapErrorKind;
use xpause::{
    build_command, send_pause_frames, PauseError, PauseFrameRequest,
    PauseOptions, APP_NAME, ARG_VERBOSE,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let code = run_with(std::env::args_os(), &mut std::io::stdout().lock());
    std::process::exit(code);
}

// Write failures on `out` (closed pipe and alike) are ignored: the exit code
// already tells whether the frames went out.
fn run_with<I, T, W>(args: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let mut cmd = build_command();
    let matches = match cmd.try_get_matches_from_mut(args) {
        Ok(m) => m,
        Err(e) => {
            return match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                    let _ = write!(out, "{}", e.render());
                    EXIT_SUCCESS
                }
                _ => {
                    let _ = writeln!(
                        out,
                        "{}\n{}",
                        e.render(),
                        cmd.render_help()
                    );
                    EXIT_USAGE
                }
            };
        }
    };

    enable_log(matches.get_count(ARG_VERBOSE));

    match run(&PauseOptions::from(&matches), out) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log::debug!("{e}");
            let _ = writeln!(out, "{}\n\n{}", e.msg(), cmd.render_help());
            exit_code(&e)
        }
    }
}

fn run<W: Write>(
    options: &PauseOptions,
    out: &mut W,
) -> Result<(), PauseError> {
    let request = PauseFrameRequest::from_options(options, out)?;
    send_pause_frames(&request, out)?;
    out.flush()?;
    Ok(())
}

fn exit_code(e: &PauseError) -> i32 {
    match e.kind() {
        xpause::ErrorKind::InvalidUsage => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

fn enable_log(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // Already initialised when invoked more than once in one process.
    let _ = env_logger::Builder::new()
        .filter(Some(APP_NAME), level)
        .try_init();
}
