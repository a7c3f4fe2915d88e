//! Error types for the content pipeline
//!
//! Conversion errors are recoverable by design: the audio processor
//! downgrades to Best quality and retries through the base path instead
//! of failing the build.

use std::fmt;

/// Result type for content conversion operations
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Content conversion errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input format the converter cannot handle (e.g. channel count)
    UnsupportedFormat(String),

    /// Malformed or inconsistent input data
    InvalidInput(String),

    /// Container decode/encode failure
    Io(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnsupportedFormat(msg) => {
                write!(f, "Unsupported format: {}", msg)
            }
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ConversionError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<hound::Error> for ConversionError {
    fn from(err: hound::Error) -> Self {
        ConversionError::Io(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_variants() {
        let err = ConversionError::UnsupportedFormat("6 channels".to_string());
        assert!(err.to_string().contains("Unsupported format"));
        assert!(err.to_string().contains("6 channels"));

        let err = ConversionError::InvalidInput("dangling frame".to_string());
        assert!(err.to_string().contains("Invalid input"));

        let err = ConversionError::Io("truncated header".to_string());
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_from_hound_error() {
        let err: ConversionError = hound::Error::TooWide.into();
        assert!(matches!(err, ConversionError::Io(_)));
    }
}
