//! Subcommand implementations.
//!
//! Every command renders its complete output in memory before anything is
//! written, so a failed run leaves no partial output file behind.

pub mod descriptor;
pub mod rom;
pub mod unpack;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Write rendered output to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
