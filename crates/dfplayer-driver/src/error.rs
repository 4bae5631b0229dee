//! Error types for the driver.

use dfplayer_protocol::{DecodeError, ProtocolError};
use thiserror::Error;

/// Errors returned by [`crate::DeviceController`] and its configuration.
///
/// A device that stays silent is not an error: commands return `Ok(None)`.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Argument rejected before anything was sent.
    #[error("invalid request: {0}")]
    Protocol(#[from] ProtocolError),

    /// Serial I/O failed.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport accepted fewer bytes than the frame holds.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite {
        /// Frame length.
        expected: usize,
        /// Bytes actually written.
        written: usize,
    },

    /// The reply could not be decoded as UTF-8.
    #[error("response is not valid UTF-8: {bytes:02X?}")]
    InvalidUtf8 {
        /// Raw bytes as received.
        bytes: Vec<u8>,
    },

    /// Configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl From<DecodeError> for DriverError {
    fn from(err: DecodeError) -> Self {
        DriverError::InvalidUtf8 { bytes: err.bytes }
    }
}

impl DriverError {
    /// Whether the error was raised by argument validation, before any I/O.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, DriverError::Protocol(_))
    }
}

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::from(ProtocolError::InvalidPlayMode(9));
        assert_eq!(
            err.to_string(),
            "invalid request: invalid play mode: 9 (expected 1-5)"
        );
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_io_error_is_not_domain() {
        let err = DriverError::from(std::io::Error::new(std::io::ErrorKind::Other, "gone"));
        assert!(!err.is_domain_error());
    }

    #[test]
    fn test_decode_error_is_not_domain() {
        let err: DriverError = dfplayer_protocol::FrameCodec::decode_response(&[0xFF])
            .unwrap_err()
            .into();
        assert!(matches!(err, DriverError::InvalidUtf8 { ref bytes } if bytes == &[0xFF]));
        assert!(!err.is_domain_error());
    }
}
