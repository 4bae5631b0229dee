//! Frame codec for AT command communication.
//!
//! Outbound frames are `AT+<body>\r\n` (or the bare `AT\r\n` connection test).
//! Inbound data is not framed at all: the host reads whatever arrived after a
//! settle delay and treats it as one reply.

use bytes::{BufMut, BytesMut};

use crate::error::{DecodeError, ProtocolError, ProtocolResult};

/// Prefix of every command frame.
pub const COMMAND_PREFIX: &str = "AT+";

/// Line terminator appended to every frame.
pub const FRAME_TERMINATOR: &str = "\r\n";

/// The bare connection-test frame.
pub const TEST_FRAME: &[u8] = b"AT\r\n";

/// Encoder/decoder for DFPlayer Pro frames.
///
/// The codec is stateless: every frame is built fresh and every reply is
/// decoded in one piece.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCodec;

impl FrameCodec {
    /// Encode a command body for transmission.
    ///
    /// Prepends `AT+` and appends `\r\n`. The body must already be checked
    /// with [`FrameCodec::check_body`] or built from validated parts.
    pub fn encode_command(body: &str) -> Vec<u8> {
        let mut buf =
            BytesMut::with_capacity(COMMAND_PREFIX.len() + body.len() + FRAME_TERMINATOR.len());
        buf.put_slice(COMMAND_PREFIX.as_bytes());
        buf.put_slice(body.as_bytes());
        buf.put_slice(FRAME_TERMINATOR.as_bytes());
        buf.to_vec()
    }

    /// Encode the connection-test frame.
    pub fn encode_test() -> Vec<u8> {
        TEST_FRAME.to_vec()
    }

    /// Check a free-form command body.
    ///
    /// Bodies must be non-empty printable ASCII; anything else would either
    /// split the frame or put bytes on the wire the module cannot parse.
    pub fn check_body(body: &str) -> ProtocolResult<()> {
        if body.is_empty() {
            return Err(ProtocolError::InvalidArgument(
                "command body is empty".to_string(),
            ));
        }
        if let Some(c) = body.chars().find(|c| !(c.is_ascii_graphic() || *c == ' ')) {
            return Err(ProtocolError::InvalidArgument(format!(
                "command body contains non-printable character {:?}",
                c
            )));
        }
        Ok(())
    }

    /// Check a value interpolated into a frame (e.g. a file path).
    ///
    /// Only control characters are rejected; the module decides what else is legal.
    pub fn check_value(value: &str) -> ProtocolResult<()> {
        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(ProtocolError::InvalidArgument(format!(
                "value contains control character {:?}",
                c
            )));
        }
        Ok(())
    }

    /// Decode the bytes read after a command.
    ///
    /// Returns `Ok(None)` when nothing arrived, `Ok(Some(text))` for valid
    /// UTF-8, and an error for anything else. The text is returned as received,
    /// terminator included.
    pub fn decode_response(data: &[u8]) -> Result<Option<String>, DecodeError> {
        if data.is_empty() {
            return Ok(None);
        }
        match std::str::from_utf8(data) {
            Ok(text) => Ok(Some(text.to_string())),
            Err(_) => {
                log::trace!("undecodable response: {:02X?}", data);
                Err(DecodeError {
                    bytes: data.to_vec(),
                })
            }
        }
    }
}
