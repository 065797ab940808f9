//! Key usage bitmask and the canonical WebCrypto usage tokens

use crate::error::{CryptoError, Result};

bitflags::bitflags! {
    /// The eight WebCrypto key usages as a bitmask.
    ///
    /// Only the eight defined bits can ever be set; construction goes
    /// through [`KeyUsages::parse_token`] or the flag constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyUsages: u8 {
        /// "encrypt"
        const ENCRYPT = 1 << 0;
        /// "decrypt"
        const DECRYPT = 1 << 1;
        /// "sign"
        const SIGN = 1 << 2;
        /// "verify"
        const VERIFY = 1 << 3;
        /// "deriveKey"
        const DERIVE_KEY = 1 << 4;
        /// "deriveBits"
        const DERIVE_BITS = 1 << 5;
        /// "wrapKey"
        const WRAP_KEY = 1 << 6;
        /// "unwrapKey"
        const UNWRAP_KEY = 1 << 7;
    }
}

/// Canonical token order, as JWK `key_ops` lists them on export.
const TOKEN_TABLE: [(KeyUsages, &str); 8] = [
    (KeyUsages::ENCRYPT, "encrypt"),
    (KeyUsages::DECRYPT, "decrypt"),
    (KeyUsages::SIGN, "sign"),
    (KeyUsages::VERIFY, "verify"),
    (KeyUsages::DERIVE_KEY, "deriveKey"),
    (KeyUsages::DERIVE_BITS, "deriveBits"),
    (KeyUsages::WRAP_KEY, "wrapKey"),
    (KeyUsages::UNWRAP_KEY, "unwrapKey"),
];

impl KeyUsages {
    /// Resolve a single canonical usage token, case-sensitively.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        TOKEN_TABLE
            .iter()
            .find(|(_, name)| *name == token)
            .map(|(flag, _)| *flag)
    }

    /// Accumulate a sequence of usage tokens into a mask.
    ///
    /// An unrecognized token is a `SyntaxError`; duplicates are
    /// tolerated here (JWK `key_ops` duplicate rejection lives in the
    /// JWK parser, where order is still observable).
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut usages = KeyUsages::empty();
        for token in tokens {
            let flag = Self::parse_token(token.as_ref()).ok_or_else(|| {
                CryptoError::syntax(format!("unknown key usage \"{}\"", token.as_ref()))
            })?;
            usages |= flag;
        }
        Ok(usages)
    }

    /// True when every usage in `other` is present in `self`.
    #[must_use]
    pub fn is_superset_of(self, other: Self) -> bool {
        self.contains(other)
    }

    /// The canonical tokens for the set bits, in table order.
    #[must_use]
    pub fn tokens(self) -> Vec<&'static str> {
        TOKEN_TABLE
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for KeyUsages {
    fn default() -> Self {
        KeyUsages::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_eight_tokens() {
        let all = [
            "encrypt",
            "decrypt",
            "sign",
            "verify",
            "deriveKey",
            "deriveBits",
            "wrapKey",
            "unwrapKey",
        ];
        let usages = KeyUsages::from_tokens(&all).unwrap();
        assert_eq!(usages, KeyUsages::all());
        assert_eq!(usages.tokens(), all);
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!(KeyUsages::parse_token("Sign").is_none());
        assert!(KeyUsages::parse_token("derivekey").is_none());
        assert!(KeyUsages::from_tokens(&["sign", "Verify"]).is_err());
    }

    #[test]
    fn superset_and_membership() {
        let mask = KeyUsages::SIGN | KeyUsages::VERIFY;
        assert!(mask.is_superset_of(KeyUsages::SIGN));
        assert!(mask.is_superset_of(KeyUsages::empty()));
        assert!(!mask.is_superset_of(KeyUsages::SIGN | KeyUsages::DECRYPT));
    }
}
