//! `core`: write a FuseSoC core descriptor for a build directory.

use crate::config::CoreArgs;
use crate::error::CliError;
use anyhow::{Context, Result};
use hlsbuild_formats::fusesoc::{CoreFileBuilder, DEFAULT_SOURCE_EXTENSION};
use std::path::PathBuf;

/// Collect the sources in the build directory and write `<core>.core` there.
///
/// Returns the path of the written descriptor.
pub fn run(args: &CoreArgs) -> Result<PathBuf> {
    if !args.build_dir.is_dir() {
        return Err(CliError::BuildDirNotFound(args.build_dir.clone()).into());
    }

    let core = CoreFileBuilder::new(&args.project, &args.core)
        .sources_from_dir(&args.build_dir, DEFAULT_SOURCE_EXTENSION)?
        .build()?;

    core.write_to_dir(&args.build_dir)
        .with_context(|| format!("Failed to write core {}", core.vlnv()))
}
