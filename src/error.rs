//! Error types for pltx.
//!
//! A single error enum covers palette lookups, preset selection, configuration
//! and the failures reported by the wrapped plotting backend.

use thiserror::Error;

/// The main error type for pltx operations.
#[derive(Error, Debug)]
pub enum PltxError {
    /// Palette index outside `[0, len)`
    #[error("Color index {index} out of range for palette of size {len}")]
    OutOfRange { index: usize, len: usize },

    /// Invalid argument errors (unknown preset, bad sizes, ...)
    #[error("Invalid argument: {param} - {message}")]
    InvalidArgument { param: String, message: String },

    /// Errors raised by the plotting backend itself
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PltxError {
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        PltxError::InvalidArgument {
            param: param.to_string(),
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        PltxError::Backend {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with PltxError
pub type Result<T> = std::result::Result<T, PltxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = PltxError::OutOfRange { index: 3, len: 3 };
        assert_eq!(
            err.to_string(),
            "Color index 3 out of range for palette of size 3"
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = PltxError::invalid("preset", "Unknown preset 'foo'");
        assert_eq!(
            err.to_string(),
            "Invalid argument: preset - Unknown preset 'foo'"
        );
    }
}
