//! Command-line configuration.
//!
//! Arguments can be provided via:
//! - CLI arguments (`--max-width`, `--output`, etc.)
//! - Environment variables (`HLSBUILD_NAME_PREFIX`, `HLSBUILD_BUILD_DIR`)
//! - Default values
//!
//! # Example
//!
//! ```
//! use clap::Parser;
//! use hlsbuild_cli::{Cli, Command};
//!
//! let cli = Cli::parse_from(["hlsbuild", "rom", "info.txt", "-m", "10"]);
//! let Command::Rom(args) = cli.command else { unreachable!() };
//! assert_eq!(args.max_width, Some(10));
//! ```

use crate::error::CliError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hlsbuild_formats::rom::vhdl::is_valid_name_prefix;
use hlsbuild_formats::rom::{DEFAULT_NAME_PREFIX, RomError, SizingMode};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hlsbuild",
    about = "Build metadata ROM generator and FuseSoC core descriptor tool",
    version
)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Encode key=value build metadata into a ROM image
    Rom(RomArgs),
    /// Recover the records stored in a raw ROM image
    Unpack(UnpackArgs),
    /// Write a FuseSoC core descriptor for the sources in a build directory
    Core(CoreArgs),
}

/// Output formats for `rom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RomFormat {
    /// VHDL package with the ROM as a constant array
    Vhdl,
    /// One hex word per line for `$readmemh`
    Memh,
    /// JSON summary of the image
    Json,
    /// Raw padded image bytes
    Bin,
}

/// Output formats for `unpack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnpackFormat {
    /// `key=value` lines in key order
    Keys,
    /// JSON object of the records
    Json,
}

/// Arguments of `rom`.
#[derive(Debug, Clone, Args)]
pub struct RomArgs {
    /// Input file with key=value lines (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Prefix for the generated VHDL package and constant names
    #[arg(
        short = 'p',
        long = "prefix",
        env = "HLSBUILD_NAME_PREFIX",
        default_value = DEFAULT_NAME_PREFIX
    )]
    pub name_prefix: String,

    /// Maximum address width for auto-sizing (4 to 12, default 8)
    #[arg(short = 'm', long)]
    pub max_width: Option<u32>,

    /// Fixed address width (4 to 10), exclusive with --max-width
    #[arg(short = 'w', long)]
    pub fixed_width: Option<u32>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = RomFormat::Vhdl)]
    pub format: RomFormat,
}

impl RomArgs {
    /// Resolve the sizing options.
    pub fn sizing_mode(&self) -> Result<SizingMode, CliError> {
        Ok(SizingMode::from_options(self.max_width, self.fixed_width)?)
    }

    /// Validate options and input before any record is read.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if:
    /// - Width options conflict or are out of range
    /// - The name prefix is not a valid VHDL identifier fragment
    /// - The input file does not exist
    pub fn validate(&self) -> Result<(), CliError> {
        self.sizing_mode()?;

        if !is_valid_name_prefix(&self.name_prefix) {
            return Err(RomError::InvalidNamePrefix(self.name_prefix.clone()).into());
        }

        if let Some(input) = &self.input
            && !input.exists()
        {
            return Err(CliError::InputNotFound(input.clone()));
        }

        Ok(())
    }
}

/// Arguments of `unpack`.
#[derive(Debug, Clone, Args)]
pub struct UnpackArgs {
    /// Raw image file as written by `rom --format bin`
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = UnpackFormat::Keys)]
    pub format: UnpackFormat,
}

/// Arguments of `core`.
#[derive(Debug, Clone, Args)]
pub struct CoreArgs {
    /// Project name (VLNV library)
    pub project: String,

    /// Core name (VLNV name and descriptor file name)
    pub core: String,

    /// Directory holding the generated sources
    #[arg(long, env = "HLSBUILD_BUILD_DIR", default_value = "build")]
    pub build_dir: PathBuf,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn rom_args(args: &[&str]) -> RomArgs {
        let cli = Cli::try_parse_from(["hlsbuild", "rom"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Rom(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rom_defaults() {
        let args = rom_args(&[]);
        assert_eq!(args.input, None);
        assert_eq!(args.name_prefix, "buildinfo");
        assert_eq!(args.format, RomFormat::Vhdl);
        assert_eq!(
            args.sizing_mode().unwrap(),
            SizingMode::Auto { max_width: 8 }
        );
    }

    #[test]
    fn test_short_options() {
        let args = rom_args(&["in.txt", "-p", "sysinfo", "-w", "6", "-o", "out.vhd", "-f", "memh"]);
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
        assert_eq!(args.name_prefix, "sysinfo");
        assert_eq!(args.fixed_width, Some(6));
        assert_eq!(args.output, Some(PathBuf::from("out.vhd")));
        assert_eq!(args.format, RomFormat::Memh);
        assert_eq!(args.sizing_mode().unwrap(), SizingMode::Fixed { width: 6 });
    }

    #[test]
    fn test_validate_checks_options_before_input() {
        let args = rom_args(&["/nonexistent/info.txt", "-m", "8", "-w", "4"]);
        assert!(matches!(
            args.validate(),
            Err(CliError::Options(RomError::ConflictingOptions { .. }))
        ));

        let args = rom_args(&["/nonexistent/info.txt", "-m", "0"]);
        assert!(matches!(
            args.validate(),
            Err(CliError::Options(RomError::InvalidWidthRange { .. }))
        ));

        let args = rom_args(&["/nonexistent/info.txt", "-p", "9lives"]);
        assert!(matches!(
            args.validate(),
            Err(CliError::Options(RomError::InvalidNamePrefix(_)))
        ));

        let args = rom_args(&["/nonexistent/info.txt"]);
        assert!(matches!(args.validate(), Err(CliError::InputNotFound(_))));
    }

    #[test]
    fn test_core_args() {
        let cli = Cli::try_parse_from(["hlsbuild", "-v", "core", "demo", "blinky"]).unwrap();
        assert!(cli.verbose);
        let Command::Core(args) = cli.command else {
            panic!("expected core command");
        };
        assert_eq!(args.project, "demo");
        assert_eq!(args.core, "blinky");
        assert_eq!(args.build_dir, PathBuf::from("build"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["hlsbuild", "rom", "--format", "verilog"]).is_err());
        assert!(Cli::try_parse_from(["hlsbuild", "unpack"]).is_err());
    }
}
