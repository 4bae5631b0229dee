//! Error types for the AT command protocol.

use thiserror::Error;

/// Errors that can occur when building or interpreting DFPlayer Pro frames.
///
/// Every variant is a domain error: it is raised before anything reaches the
/// wire, so a caller receiving one knows no frame was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Volume outside the module's 0-30 range.
    #[error("volume must be between {min} and {max}, got {value}")]
    VolumeOutOfRange {
        /// Requested volume.
        value: i64,
        /// Lowest accepted volume.
        min: u8,
        /// Highest accepted volume.
        max: u8,
    },

    /// Play mode code not in 1-5.
    #[error("invalid play mode: {0} (expected 1-5)")]
    InvalidPlayMode(i64),

    /// Baud rate the module cannot switch to.
    #[error("unsupported baud rate: {0} (expected 9600, 19200, 38400, 57600 or 115200)")]
    UnsupportedBaudRate(u32),

    /// Argument that would produce a malformed frame.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Reply bytes that are not valid UTF-8.
///
/// Raised after a frame went out, so it is not a [`ProtocolError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("response is not valid UTF-8 ({} bytes)", .bytes.len())]
pub struct DecodeError {
    /// Raw bytes as received.
    pub bytes: Vec<u8>,
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
