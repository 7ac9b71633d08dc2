//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, Command, SampleCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Parses `args` after `wilson sample`, panicking on clap errors.
pub(super) fn parse_sample(args: &[&str]) -> SampleCommand {
    let argv = ["wilson", "sample"].iter().chain(args);
    match Cli::try_parse_from(argv) {
        Ok(Cli {
            command: Command::Sample(command),
        }) => command,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn sample_command(seed: u64, side: usize) -> SampleCommand {
    parse_sample(&[&seed.to_string(), &side.to_string()])
}

pub(super) fn with_dot_dir(mut command: SampleCommand, dir: PathBuf) -> SampleCommand {
    command.dot_dir = Some(dir);
    command
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
