//! Command-line front end for the HLS build pipeline.
//!
//! Wraps the `hlsbuild-formats` library in three subcommands:
//! - `rom`: encode `key=value` build metadata into a ROM image rendered as a
//!   VHDL package, `$readmemh` text, a JSON summary or raw bytes
//! - `unpack`: recover the records from a raw image
//! - `core`: write a FuseSoC core descriptor for a build directory
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use hlsbuild_cli::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse();
//!     hlsbuild_cli::run(&cli, "")
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
pub mod config;
pub mod error;

pub use config::{Cli, Command, CoreArgs, RomArgs, RomFormat, UnpackArgs, UnpackFormat};
pub use error::CliError;

/// Run a parsed command line.
///
/// `invocation` is recorded in the header of generated VHDL packages.
pub fn run(cli: &Cli, invocation: &str) -> anyhow::Result<()> {
    match &cli.command {
        Command::Rom(args) => commands::rom::run(args, invocation),
        Command::Unpack(args) => commands::unpack::run(args),
        Command::Core(args) => {
            let path = commands::descriptor::run(args)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
