//! Error types for the command-line front end.

use hlsbuild_formats::rom::RomError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors detected before any input is read.
#[derive(Debug, Error)]
pub enum CliError {
    /// Sizing options or name prefix rejected by the encoder
    #[error("Invalid ROM options: {0}")]
    Options(#[from] RomError),

    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Build directory does not exist
    #[error("Build directory not found: {}", .0.display())]
    BuildDirNotFound(PathBuf),
}
