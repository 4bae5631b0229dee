//! Response interpretation for the AT protocol.
//!
//! Replies from the module are short text lines:
//! - Status: `OK`, `ERROR`
//! - Values: `VOL=15`, or the bracketed form `VOL = [15]`
//! - Free text: file names, version banners, etc.
//!
//! The driver hands back raw text; parsing it is up to the caller.

/// Parsed reply from the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Plain `OK`.
    Ok,

    /// An error reply (text kept as received, trimmed).
    Error(String),

    /// A `KEY=VALUE` reply. Brackets around the value are stripped.
    Value {
        /// Key before the `=`.
        key: String,
        /// Value after the `=`.
        value: String,
    },

    /// Anything else, trimmed.
    Text(String),
}

impl Response {
    /// Parse a decoded reply.
    ///
    /// Leading and trailing whitespace (including the terminator) is ignored.
    pub fn parse(text: &str) -> Response {
        let text = text.trim();

        if text.eq_ignore_ascii_case("OK") {
            return Response::Ok;
        }

        if text.starts_with("ERR") || text.starts_with("Error") || text.starts_with("error") {
            return Response::Error(text.to_string());
        }

        if let Some(response) = Self::try_parse_value(text) {
            return response;
        }

        Response::Text(text.to_string())
    }

    /// Try to parse `KEY=VALUE` or `KEY = [VALUE]`.
    fn try_parse_value(text: &str) -> Option<Response> {
        let (key, value) = text.split_once('=')?;
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value)
            .trim();

        Some(Response::Value {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Check if this is an OK response.
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    /// Check if this is an error response.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Get the value if this is a Value response.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Response::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Interpret the reply as a number.
    ///
    /// Works for `Value` replies and for bare numeric text such as `12`.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Response::Value { value, .. } => value.parse().ok(),
            Response::Text(text) => text.parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let response = Response::parse("OK\r\n");
        assert_eq!(response, Response::Ok);
        assert!(response.is_ok());
    }

    #[test]
    fn test_parse_error() {
        let response = Response::parse("ERROR\r\n");
        assert!(response.is_error());
        assert_eq!(response, Response::Error("ERROR".to_string()));
    }

    #[test]
    fn test_parse_value() {
        let response = Response::parse("VOL=15\r\n");
        assert_eq!(
            response,
            Response::Value {
                key: "VOL".to_string(),
                value: "15".to_string(),
            }
        );
        assert_eq!(response.as_number(), Some(15));
    }

    #[test]
    fn test_parse_bracketed_value() {
        let response = Response::parse("VOL = [20]\r\n");
        assert_eq!(response.as_value(), Some("20"));
        assert_eq!(response.as_number(), Some(20));
    }

    #[test]
    fn test_parse_text() {
        let response = Response::parse("/music/intro.mp3\r\n");
        assert_eq!(response, Response::Text("/music/intro.mp3".to_string()));
        assert_eq!(response.as_number(), None);
    }

    #[test]
    fn test_parse_numeric_text() {
        assert_eq!(Response::parse("42\r\n").as_number(), Some(42));
    }
}
