//! hlsbuild binary entry point.
//!
//! This is a thin wrapper around the hlsbuild-cli library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging on stderr
//! 3. Runs the selected subcommand
//!
//! Any failure is reported as `error: ...` on stderr with exit code 1.

use clap::Parser;
use hlsbuild_cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let invocation = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    match hlsbuild_cli::run(&cli, &invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
