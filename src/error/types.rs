//! Error type definitions.
use thiserror::Error;

/// Main error type for mimesniff operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading a byte prefix
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixed signature segment is not a valid hex byte run
    #[error("Invalid hex pattern '{pattern}': {reason}")]
    InvalidHex { pattern: String, reason: String },

    /// A signature entry has no fixed bytes to anchor on
    #[error("Signature for '{mime}' has no fixed bytes")]
    EmptySignature { mime: String },

    /// A signature spans more bytes than a prefix read may cover
    #[error("Signature for '{mime}' spans more than {max} bytes")]
    PatternTooLong { mime: String, max: usize },

    /// A skip segment of zero bytes
    #[error("Signature for '{mime}' contains a zero-length skip")]
    ZeroSkip { mime: String },
}

/// Result type for mimesniff operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn test_invalid_hex_display() {
        let err = Error::InvalidHex {
            pattern: "ABC".to_string(),
            reason: "odd length".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid hex pattern 'ABC': odd length");
    }
}
