//! Error types for FuseSoC core descriptors

use thiserror::Error;

/// Errors that can occur when building or parsing core descriptors
#[derive(Debug, Error)]
pub enum CoreError {
    /// VLNV name component is empty or contains separators
    #[error("Invalid {field} '{value}': must be non-empty without ':' or whitespace")]
    InvalidName {
        /// Which component failed
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Source file name cannot be listed in a fileset
    #[error("Invalid source file name '{0}'")]
    InvalidFileName(String),

    /// Descriptor text does not follow the expected layout
    #[error("Line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Build directory could not be scanned
    #[error("Failed to scan {path}: {reason}")]
    Scan {
        /// Directory being scanned
        path: String,
        /// Underlying walk error
        reason: String,
    },

    /// IO error while writing the descriptor
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for CoreError {
    fn from(e: walkdir::Error) -> Self {
        Self::Scan {
            path: e
                .path()
                .map_or_else(String::new, |p| p.display().to_string()),
            reason: e.to_string(),
        }
    }
}

/// Result type alias for core descriptor operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidName {
            field: "core name",
            value: "a:b".to_string(),
        };
        assert!(err.to_string().contains("core name"));
        assert!(err.to_string().contains("a:b"));

        let err = CoreError::Parse {
            line: 1,
            reason: "missing CAPI=2 header".to_string(),
        };
        assert_eq!(err.to_string(), "Line 1: missing CAPI=2 header");
    }
}
