//! VHDL package rendering for ROM images
//!
//! The package declares a 32-bit vector array type, an address width
//! constant and the ROM contents as a constant array literal. Every word is
//! annotated with the stream bytes it carries; the annotation is informational
//! only.

use crate::rom::error::{Result, RomError};
use crate::rom::image::RomImage;
use std::fmt::Write as _;

/// Name prefix used when none is configured
pub const DEFAULT_NAME_PREFIX: &str = "buildinfo";

/// Generator name written into the header comment
pub const GENERATOR: &str = "hlsbuild";

/// VHDL package renderer for a `RomImage`
#[derive(Debug, Clone)]
pub struct VhdlPackage<'a> {
    image: &'a RomImage,
    name_prefix: String,
    invocation: String,
}

impl<'a> VhdlPackage<'a> {
    /// Create a renderer with the default `buildinfo` prefix
    pub fn new(image: &'a RomImage) -> Self {
        Self {
            image,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            invocation: String::new(),
        }
    }

    /// Set the prefix used for the package, type and constant names
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Set the generator arguments shown in the header comment (empty by default)
    pub fn invocation(mut self, args: impl Into<String>) -> Self {
        self.invocation = args.into();
        self
    }

    /// Name of the generated package
    pub fn package_name(&self) -> String {
        format!("zeropage_{}_pkg", self.name_prefix)
    }

    /// Render the complete package source
    pub fn render(&self) -> Result<String> {
        if !is_valid_name_prefix(&self.name_prefix) {
            return Err(RomError::InvalidNamePrefix(self.name_prefix.clone()));
        }

        let image = self.image;
        let prefix = &self.name_prefix;
        let width = image.width();
        let word_count = width.words();
        let mut out = String::new();

        let _ = writeln!(out, "-- generated by {GENERATOR}");
        let _ = writeln!(out, "--   called with: {}", self.invocation);
        let _ = writeln!(
            out,
            "--   data size: {} bytes, {} words",
            image.used_bytes(),
            image.used_words()
        );
        let _ = writeln!(out, "--   ROM address width: {width}");
        let _ = writeln!(out, "-- for data (with sorted keys):");
        for (index, (key, value)) in image.records().iter().enumerate() {
            let _ = writeln!(out, "--   {index:3}: {key}={value}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "library ieee;");
        let _ = writeln!(out, "use ieee.std_logic_1164.all;");
        let _ = writeln!(out, "use ieee.numeric_std.all;");
        let _ = writeln!(out);

        let _ = writeln!(out, "package {} is", self.package_name());
        let _ = writeln!(out, "  type {prefix}_rom_array is array (integer range <>)");
        let _ = writeln!(out, "       of std_logic_vector(31 downto 0);");
        let _ = writeln!(out);
        let _ = writeln!(out, "  constant c_{prefix}_addr_width : integer := {width};");
        let _ = writeln!(
            out,
            "  constant {prefix}_rom : {prefix}_rom_array(0 to {}) := (",
            word_count - 1
        );

        for (index, word, chunk) in image.chunks() {
            let text = if chunk.iter().all(|&b| b == 0) {
                String::new()
            } else {
                byte_literal(chunk)
            };
            let sep = if index < word_count - 1 { ", " } else { ");" };
            let _ = writeln!(out, "    x\"{word:08x}\"{sep}    -- {index:3}  {text}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "end {};", self.package_name());

        Ok(out)
    }
}

/// Check that a prefix yields legal VHDL identifiers
///
/// Must start with a letter and contain only word characters. A trailing or
/// doubled underscore would produce illegal names such as `x__rom`.
pub fn is_valid_name_prefix(prefix: &str) -> bool {
    prefix.as_bytes().first().is_some_and(u8::is_ascii_alphabetic)
        && prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && !prefix.ends_with('_')
        && !prefix.contains("__")
}

/// Show raw bytes as a byte-string literal, e.g. `b'a=1\n'`
///
/// Single quotes are used unless the bytes contain a single quote and no
/// double quote.
pub fn byte_literal(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\'' if quote == '\'' => out.push_str("\\'"),
            0x20..=0x7E => out.push(char::from(b)),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(quote);
    out
}
