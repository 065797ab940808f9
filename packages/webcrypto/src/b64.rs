//! Base64url encoding/decoding for JWK numeric members (RFC 7515)

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Base64 URL-safe encoding without padding
#[inline]
#[must_use]
pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding.
///
/// Strict about the alphabet: padding characters and bytes outside the
/// URL-safe alphabet are rejected rather than stripped.
#[inline]
pub(crate) fn base64url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_padded_input() {
        assert!(base64url_decode("YQ==").is_err());
        assert_eq!(base64url_decode("YQ").unwrap(), b"a");
    }

    #[test]
    fn rejects_standard_alphabet() {
        // '+' and '/' belong to the standard alphabet, not the URL-safe one
        assert!(base64url_decode("a+b/").is_err());
    }

    #[test]
    fn encode_omits_padding() {
        assert_eq!(base64url_encode(b"a"), "YQ");
        assert_eq!(base64url_encode(&[0xfb, 0xff]), "-_8");
    }
}
