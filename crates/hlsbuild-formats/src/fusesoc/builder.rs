//! Builder for constructing FuseSoC core descriptors

use crate::fusesoc::core_file::CoreFile;
use crate::fusesoc::error::{CoreError, Result};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default VLNV vendor component
pub const DEFAULT_VENDOR: &str = "cri";

/// Default FuseSoC file type for generated sources
pub const DEFAULT_FILE_TYPE: &str = "vhdlSource-2008";

/// Default extension of collected sources
pub const DEFAULT_SOURCE_EXTENSION: &str = "vhd";

/// Builder for constructing `CoreFile` instances
///
/// File names are deduplicated and sorted at build time so the descriptor
/// does not depend on directory iteration order.
#[derive(Debug, Clone)]
pub struct CoreFileBuilder {
    vendor: String,
    project: String,
    core: String,
    file_type: String,
    files: Vec<String>,
}

impl CoreFileBuilder {
    /// Create a builder for `cri:<project>:<core>`
    pub fn new(project: impl Into<String>, core: impl Into<String>) -> Self {
        Self {
            vendor: DEFAULT_VENDOR.to_string(),
            project: project.into(),
            core: core.into(),
            file_type: DEFAULT_FILE_TYPE.to_string(),
            files: Vec::new(),
        }
    }

    /// Set the VLNV vendor component
    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Set the FuseSoC file type
    #[must_use]
    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Add a source file name
    #[must_use]
    pub fn add_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Add every file directly inside `dir` with the given extension
    ///
    /// Only base names are recorded. Subdirectories are not searched.
    pub fn sources_from_dir<P: AsRef<Path>>(mut self, dir: P, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut found = 0;

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let name = entry.file_name().to_str().ok_or_else(|| {
                CoreError::InvalidFileName(entry.file_name().to_string_lossy().into_owned())
            })?;
            self.files.push(name.to_string());
            found += 1;
        }

        debug!("Found {} .{} files in {}", found, extension, dir.display());
        Ok(self)
    }

    /// Build the final `CoreFile`
    pub fn build(mut self) -> Result<CoreFile> {
        check_name("vendor", &self.vendor)?;
        check_name("project name", &self.project)?;
        check_name("core name", &self.core)?;
        if self.file_type.is_empty() || self.file_type.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidName {
                field: "file type",
                value: self.file_type,
            });
        }

        for file in &self.files {
            if file.is_empty() || file.contains(['\n', '\r']) {
                return Err(CoreError::InvalidFileName(file.clone()));
            }
        }
        self.files.sort();
        self.files.dedup();

        if self.files.is_empty() {
            warn!("Core {}:{} lists no source files", self.project, self.core);
        }

        Ok(CoreFile {
            vendor: self.vendor,
            project: self.project,
            core: self.core,
            file_type: self.file_type,
            files: self.files,
        })
    }
}

fn check_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains(':') || value.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_defaults() {
        let core = CoreFileBuilder::new("proj", "blinky")
            .add_file("top.vhd")
            .build()
            .unwrap();
        assert_eq!(core.vlnv(), "cri:proj:blinky");
        assert_eq!(core.file_type, "vhdlSource-2008");
        assert_eq!(core.files, vec!["top.vhd"]);
    }

    #[test]
    fn test_files_sorted_and_deduplicated() {
        let core = CoreFileBuilder::new("proj", "blinky")
            .add_file("b.vhd")
            .add_file("a.vhd")
            .add_file("b.vhd")
            .build()
            .unwrap();
        assert_eq!(core.files, vec!["a.vhd", "b.vhd"]);
    }

    #[test]
    fn test_rejects_bad_names() {
        for (project, core) in [("", "c"), ("p", ""), ("a:b", "c"), ("p", "my core")] {
            assert!(matches!(
                CoreFileBuilder::new(project, core).build(),
                Err(CoreError::InvalidName { .. })
            ));
        }
        assert!(matches!(
            CoreFileBuilder::new("p", "c").add_file("a\nb.vhd").build(),
            Err(CoreError::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_sources_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("top.vhd"), "").unwrap();
        std::fs::write(dir.path().join("rom_pkg.vhd"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.vhd")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("deep.vhd"), "").unwrap();

        let core = CoreFileBuilder::new("proj", "blinky")
            .sources_from_dir(dir.path(), "vhd")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(core.files, vec!["rom_pkg.vhd", "top.vhd"]);
    }

    #[test]
    fn test_sources_from_missing_dir() {
        let dir = TempDir::new().unwrap();
        let result = CoreFileBuilder::new("p", "c").sources_from_dir(dir.path().join("gone"), "vhd");
        assert!(matches!(result, Err(CoreError::Scan { .. })));
    }
}
