//! Format builders and parsers for the HLS hardware build pipeline
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format packing
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Many HDL-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate provides symmetric (builder and parser) implementations for the
//! artifacts produced by an HLS/FPGA build pipeline.
//!
//! # Supported Formats
//!
//! - **ROM**: Key/value build metadata packed into a power-of-two sized
//!   32-bit word ROM image, with VHDL, memory-init and JSON renderers
//! - **FuseSoC**: CAPI=2 core descriptors listing the generated HDL sources
//!
//! # Design Principles
//!
//! Every format implementation follows these principles:
//! - **Deterministic Output**: The same input set always yields identical bytes
//! - **Type Safety**: Use Rust's type system to enforce invariants
//! - **Round-Trip Guarantee**: parse(build(data)) == data

#![warn(missing_docs)]

/// FuseSoC CAPI=2 core descriptors for generated HDL sources
///
/// Builds the `.core` file that lets FuseSoC pick up every VHDL file emitted
/// into a build directory.
///
/// See the [`fusesoc`] module for usage examples.
pub mod fusesoc;
/// Build metadata ROM images
///
/// This module encodes a set of `key=value` metadata records into a binary
/// image for a hardware read-only memory. The image holds `2^w` little-endian
/// 32-bit words where `w` is the ROM address width.
///
/// Key features:
/// - **Strict Input Validation**: Printable ASCII, word-character keys, unique keys
/// - **Canonical Ordering**: Records are always serialized in ascending key order
/// - **Auto-Sizing**: Minimal power-of-two capacity with a configurable ceiling
/// - **Symmetric Unpacking**: Words decode back to the exact record set
///
/// See the [`rom`] module for detailed usage examples.
pub mod rom;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

/// Common format trait for binary pipeline artifacts
pub trait HwFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;

    /// Verify round-trip correctness
    fn verify_round_trip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        let parsed = Self::parse(data)?;
        let rebuilt = parsed.build()?;
        if data != rebuilt.as_slice() {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
