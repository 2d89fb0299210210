//! Error types for the ROM image format

use thiserror::Error;

/// Errors that can occur when encoding or unpacking ROM images
#[derive(Debug, Error)]
pub enum RomError {
    /// Input line contains a byte outside the printable ASCII range
    #[error("Line {line}: non-ASCII character in '{text}'")]
    InvalidCharacter {
        /// 1-based input line number
        line: usize,
        /// Offending line, escaped for display
        text: String,
    },

    /// Input line is not a `key=value` pair with a word-character key
    #[error("Line {line}: bad key-value pair in '{text}'")]
    MalformedRecord {
        /// 1-based input line number
        line: usize,
        /// Offending line
        text: String,
    },

    /// Key appears more than once
    #[error("Line {line}: duplicate key '{key}' in '{text}'")]
    DuplicateKey {
        /// 1-based input line number (insertion position for programmatic records)
        line: usize,
        /// The repeated key
        key: String,
        /// Offending line
        text: String,
    },

    /// Both a maximum width and a fixed width were supplied
    #[error(
        "Conflicting options: fixed address width {fixed_width} can't be combined with maximum width {max_width}"
    )]
    ConflictingOptions {
        /// Supplied maximum width
        max_width: u32,
        /// Supplied fixed width
        fixed_width: u32,
    },

    /// Width option outside its allowed range
    #[error("Invalid {option}: must be in {min} to {max}, got {value}")]
    InvalidWidthRange {
        /// Option name
        option: &'static str,
        /// Supplied value
        value: u32,
        /// Smallest allowed value
        min: u32,
        /// Largest allowed value
        max: u32,
    },

    /// Data does not fit into the allowed ROM size
    #[error(
        "Data size {used_bytes} larger than ROM size {capacity_bytes} (needs address width {required_width}, allowed {allowed_width})"
    )]
    CapacityExceeded {
        /// Stream length including the terminator
        used_bytes: usize,
        /// Byte capacity at the allowed width
        capacity_bytes: usize,
        /// Minimal width the data needs
        required_width: u32,
        /// Largest width the configuration allows
        allowed_width: u32,
    },

    /// Renderer name prefix is not usable as an HDL identifier fragment
    #[error("Invalid name prefix '{0}': must start with a letter and contain only [0-9a-zA-Z_]")]
    InvalidNamePrefix(String),

    /// Image data is shorter than its content requires
    #[error("Truncated data: expected {expected} bytes, got {actual} bytes")]
    Truncated {
        /// Expected minimum size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Stream bytes do not decode back into records
    #[error("Invalid ROM stream: {0}")]
    InvalidStream(String),

    /// Binary read/write error
    #[error("Binary packing error: {0}")]
    Binary(String),

    /// JSON summary (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for RomError {
    fn from(e: binrw::Error) -> Self {
        Self::Binary(e.to_string())
    }
}

/// Result type alias for ROM image operations
pub type Result<T> = std::result::Result<T, RomError>;
