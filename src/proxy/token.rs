//! URL token codec.
//!
//! # Responsibilities
//! - Encode an absolute target URL into a transport-safe opaque token
//! - Decode a token back into exactly the URL it was built from
//!
//! # Design Decisions
//! - URL-safe base64 without padding: the alphabet (`A-Z a-z 0-9 - _`) is
//!   legal inside quoted HTML attribute values and query-string components,
//!   so tokens never need a second escaping layer
//! - Pure functions: equal URLs always produce equal tokens

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

/// Errors produced when a token is not valid output of [`encode`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token was empty.
    #[error("empty token")]
    Empty,

    /// The token contained characters outside the URL-safe base64 alphabet,
    /// or had a malformed length.
    #[error("token is not valid URL-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not valid UTF-8.
    #[error("decoded token is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Encode a target URL into an opaque transport-safe token.
///
/// Total over all input strings; never fails.
pub fn encode(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(url.as_bytes())
}

/// Decode a token back into the target URL it encodes.
pub fn decode(token: &str) -> Result<String, DecodeError> {
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }
    let bytes = URL_SAFE_NO_PAD.decode(token)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let urls = [
            "http://lg.nexlinx.net.pk",
            "https://www.cogentco.com/en/looking-glass",
            "https://lg.he.net/?q=bgp&r=4",
            "https://example.com/path/with spaces?a=1&b=2#frag",
        ];
        for url in urls {
            assert_eq!(decode(&encode(url)).unwrap(), url);
        }
    }

    #[test]
    fn test_token_alphabet_is_transport_safe() {
        // Input chosen so padded/standard base64 would emit '+', '/', '='.
        let token = encode("https://example.com/?????>>>");
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        for forbidden in ['"', '\'', '&', '=', '+', '/'] {
            assert!(!token.contains(forbidden));
        }
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(decode(""), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_rejects_illegal_characters() {
        assert!(matches!(decode("not a token!"), Err(DecodeError::Base64(_))));
        assert!(matches!(decode("abc+/=="), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_decode_rejects_malformed_length() {
        // A single base64 symbol can never form a whole byte.
        assert!(matches!(decode("A"), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_decode_rejects_non_utf8_bytes() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert!(matches!(decode(&token), Err(DecodeError::NotUtf8(_))));
    }

    #[test]
    fn test_deterministic() {
        let url = "https://lg.twelve99.net";
        assert_eq!(encode(url), encode(url));
    }
}
