//! Builder for constructing ROM images

use crate::rom::error::Result;
use crate::rom::image::RomImage;
use crate::rom::record::{Record, RecordSet, RecordReader};
use crate::rom::width::SizingMode;
use std::io::Read;

/// Builder for constructing `RomImage` instances
///
/// Collects sizing options and records, then validates everything at build
/// time. Option errors are reported before any record is looked at.
#[derive(Debug, Clone, Default)]
pub struct RomImageBuilder {
    max_width: Option<u32>,
    fixed_width: Option<u32>,
    records: Vec<(String, String)>,
}

impl RomImageBuilder {
    /// Create a new builder with default settings
    ///
    /// Defaults: auto-sizing with a maximum address width of 8
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auto-sizing ceiling (4 to 12)
    #[must_use]
    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Request a fixed address width (4 to 10)
    #[must_use]
    pub fn fixed_width(mut self, width: u32) -> Self {
        self.fixed_width = Some(width);
        self
    }

    /// Add a `key=value` record
    #[must_use]
    pub fn add_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.push((key.into(), value.into()));
        self
    }

    /// Resolve the configured sizing mode
    pub fn sizing_mode(&self) -> Result<SizingMode> {
        SizingMode::from_options(self.max_width, self.fixed_width)
    }

    /// Build the final `RomImage` from the added records
    pub fn build(self) -> Result<RomImage> {
        let mode = self.sizing_mode()?;

        let mut records = RecordSet::new();
        for (key, value) in self.records {
            records.insert(Record::new(key, value)?)?;
        }

        RomImage::encode(records, mode)
    }

    /// Build a `RomImage` from line-oriented `key=value` input
    ///
    /// Records added with [`add_record`](Self::add_record) are ignored.
    pub fn build_from_reader<R: Read>(self, reader: R) -> Result<RomImage> {
        let mode = self.sizing_mode()?;
        let records = RecordReader::new(reader).read_records()?;
        RomImage::encode(records, mode)
    }
}
