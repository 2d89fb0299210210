//! CAPI=2 core descriptor rendering and parsing

use crate::fusesoc::error::{CoreError, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Indentation of entries in the `files:` list
const FILE_INDENT: &str = "            ";

/// FuseSoC core descriptor with a single `rtl` fileset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreFile {
    /// VLNV vendor component
    pub vendor: String,
    /// VLNV library component (the project)
    pub project: String,
    /// VLNV name component (the core)
    pub core: String,
    /// FuseSoC file type of every source
    pub file_type: String,
    /// Source file names, relative to the descriptor
    pub files: Vec<String>,
}

impl CoreFile {
    /// Full `vendor:project:core` name
    pub fn vlnv(&self) -> String {
        format!("{}:{}:{}", self.vendor, self.project, self.core)
    }

    /// File name the descriptor is written to
    pub fn file_name(&self) -> String {
        format!("{}.core", self.core)
    }

    /// Render the descriptor text
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "CAPI=2:");
        let _ = writeln!(out);
        let _ = writeln!(out, "name: {}", self.vlnv());

        let _ = writeln!(out, "filesets:");
        let _ = writeln!(out, "    rtl:");
        let _ = writeln!(out, "        file_type: {}", self.file_type);
        let _ = writeln!(out, "        files:");
        for file in &self.files {
            let _ = writeln!(out, "{FILE_INDENT}- {file}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "targets:");
        let _ = writeln!(out, "    default:");
        let _ = writeln!(out, "        filesets:");
        let _ = writeln!(out, "           - rtl");

        out
    }

    /// Parse descriptor text in the layout produced by [`render`](Self::render)
    pub fn parse_str(text: &str) -> Result<Self> {
        let mut cursor = LineCursor::new(text);

        cursor.expect_line("CAPI=2:")?;
        cursor.expect_line("")?;
        let (n, vlnv) = cursor.prefixed("name: ")?;
        let mut parts = vlnv.split(':');
        let (Some(vendor), Some(project), Some(core), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::Parse {
                line: n,
                reason: format!("name '{vlnv}' is not vendor:project:core"),
            });
        };

        cursor.expect_line("filesets:")?;
        cursor.expect_line("    rtl:")?;
        let (_, file_type) = cursor.prefixed("        file_type: ")?;
        cursor.expect_line("        files:")?;

        let mut files = Vec::new();
        loop {
            let (n, line) = cursor.next_line("files list end")?;
            if line.is_empty() {
                break;
            }
            let file = line
                .strip_prefix(FILE_INDENT)
                .and_then(|l| l.strip_prefix("- "))
                .ok_or_else(|| CoreError::Parse {
                    line: n,
                    reason: format!("expected file entry, got '{line}'"),
                })?;
            files.push(file.to_string());
        }

        cursor.expect_line("targets:")?;
        cursor.expect_line("    default:")?;
        cursor.expect_line("        filesets:")?;
        cursor.expect_line("           - rtl")?;

        Ok(Self {
            vendor: vendor.to_string(),
            project: project.to_string(),
            core: core.to_string(),
            file_type: file_type.to_string(),
            files,
        })
    }

    /// Write the descriptor into `dir` as `<core>.core`, returning its path
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, self.render())?;
        info!(
            "Wrote core {} with {} files to {}",
            self.vlnv(),
            self.files.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Numbered line iterator for the fixed descriptor layout
struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last: 0,
        }
    }

    fn next_line(&mut self, wanted: &str) -> Result<(usize, &'a str)> {
        match self.lines.next() {
            Some((index, line)) => {
                self.last = index + 1;
                Ok((self.last, line))
            }
            None => Err(CoreError::Parse {
                line: self.last + 1,
                reason: format!("unexpected end of file, expected {wanted}"),
            }),
        }
    }

    fn expect_line(&mut self, expected: &str) -> Result<()> {
        let (n, line) = self.next_line(&format!("'{expected}'"))?;
        if line == expected {
            Ok(())
        } else {
            Err(CoreError::Parse {
                line: n,
                reason: format!("expected '{expected}', got '{line}'"),
            })
        }
    }

    fn prefixed(&mut self, prefix: &str) -> Result<(usize, &'a str)> {
        let (n, line) = self.next_line(&format!("'{prefix}...'"))?;
        line.strip_prefix(prefix)
            .map(|rest| (n, rest))
            .ok_or_else(|| CoreError::Parse {
                line: n,
                reason: format!("expected '{prefix}...', got '{line}'"),
            })
    }
}

impl crate::HwFormat for CoreFile {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let text = std::str::from_utf8(data)?;
        Ok(Self::parse_str(text)?)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(self.render().into_bytes())
    }
}
