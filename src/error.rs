//! Error types for program-parameter inspection.
//!
//! This module provides structured error handling using thiserror for
//! everything that can go wrong while decoding or reporting a record.

use thiserror::Error;

/// Main error type for progparam operations.
#[derive(Debug, Error)]
pub enum ProgParamError {
    /// Raw record shorter than the fixed toolchain layout
    #[error("truncated program parameters: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A region or stack bound is inconsistent
    #[error("invalid memory layout: {0}")]
    InvalidLayout(String),

    /// File and stream I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ProgParamError {
    fn from(err: serde_json::Error) -> Self {
        ProgParamError::Serialization(err.to_string())
    }
}

/// Result type alias for progparam operations
pub type Result<T> = std::result::Result<T, ProgParamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProgParamError::Truncated {
            expected: 60,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "truncated program parameters: expected 60 bytes, got 12"
        );

        let err = ProgParamError::InvalidLayout("root code ends before it begins".to_string());
        assert_eq!(
            err.to_string(),
            "invalid memory layout: root code ends before it begins"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ProgParamError::from(io);
        assert!(matches!(err, ProgParamError::Io(_)));
    }
}
