//! Build metadata ROM image format
//!
//! Encodes `key=value` build metadata into a binary image for a hardware
//! read-only memory, and decodes such images back.
//!
//! # Format Overview
//!
//! - Records are serialized as `key=value` in ascending key order
//! - Records are joined with `\n` (0x0A), the last one ends with `\0` (0x00)
//! - The stream is zero-padded to `4 * 2^w` bytes, `w` being the address width
//! - The padded image is read as `2^w` little-endian 32-bit words
//! - Auto-sizing picks the smallest `w >= 4` that fits, up to a ceiling
//!
//! # Pipeline
//!
//! collect ([`RecordReader`]) → serialize ([`serialize`]) → size
//! ([`SizingMode::plan`]) → pack ([`RomImage`]) → render ([`VhdlPackage`],
//! [`render_memh`], [`RomSummary`])
//!
//! # Usage
//!
//! ```rust
//! use hlsbuild_formats::rom::{RomImage, RomImageBuilder, VhdlPackage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = RomImageBuilder::new()
//!     .max_width(8)
//!     .build_from_reader(&b"b=2\na=1\n"[..])?;
//!
//! assert_eq!(image.stream(), b"a=1\nb=2\0");
//! assert_eq!(image.width().get(), 4);
//! assert_eq!(image.words()[0], 0x0A31_3D61);
//!
//! // Words decode back to the same records
//! let unpacked = RomImage::unpack(image.words())?;
//! assert_eq!(unpacked.records(), image.records());
//!
//! let vhdl = VhdlPackage::new(&image).name_prefix("buildinfo").render()?;
//! assert!(vhdl.contains("package zeropage_buildinfo_pkg is"));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod image;
pub mod memh;
pub mod record;
pub mod stream;
pub mod summary;
pub mod vhdl;
pub mod width;

// Re-export main types
pub use builder::RomImageBuilder;
pub use error::{Result, RomError};
pub use image::RomImage;
pub use memh::{parse_memh, render_memh};
pub use record::{Record, RecordReader, RecordSet};
pub use stream::{deserialize, serialize};
pub use summary::RomSummary;
pub use vhdl::{DEFAULT_NAME_PREFIX, VhdlPackage};
pub use width::{AddressWidth, SizingMode};

/// Encode a record set with the given sizing mode
pub fn encode(records: RecordSet, mode: SizingMode) -> Result<RomImage> {
    RomImage::encode(records, mode)
}

/// Decode the records from a word sequence and its used byte count
pub fn unpack(words: &[u32], used_bytes: usize) -> Result<RecordSet> {
    RomImage::from_words(words, used_bytes).map(|image| image.records().clone())
}
