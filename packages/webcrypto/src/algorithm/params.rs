//! Normalized algorithm parameters, one variant per algorithm/operation family

use super::{AlgorithmId, NamedCurve};

/// The result of normalizing an algorithm descriptor for an operation.
///
/// A closed tagged union: every supported (algorithm, operation) pair
/// resolves to exactly one variant, so downstream `match` arms cover
/// the full surface at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParams {
    /// A digest algorithm; carries no parameters beyond the identifier.
    Digest {
        /// The resolved hash algorithm
        id: AlgorithmId,
    },

    /// RSA key import (RSASSA-PKCS1-v1_5, RSA-PSS, RSA-OAEP).
    RsaHashedImport {
        /// The RSA algorithm family
        id: AlgorithmId,
        /// Hash bound to the key at import time
        hash: AlgorithmId,
    },

    /// RSA key-pair generation.
    RsaHashedKeyGen {
        /// The RSA algorithm family
        id: AlgorithmId,
        /// Modulus length in bits
        modulus_length: u32,
        /// Public exponent as a big-endian unsigned integer
        public_exponent: Vec<u8>,
        /// Hash bound to the generated keys
        hash: AlgorithmId,
    },

    /// RSASSA-PKCS1-v1_5 sign/verify; the key carries the hash.
    RsassaSignVerify,

    /// RSA-PSS sign/verify.
    RsaPssSignVerify {
        /// Salt length in bytes
        salt_length: u32,
    },

    /// RSA-OAEP encryption/wrapping.
    RsaOaepCipher {
        /// Optional label bound into the OAEP padding
        label: Option<Vec<u8>>,
    },

    /// EC key import (ECDSA, ECDH).
    EcImport {
        /// The EC algorithm family
        id: AlgorithmId,
        /// Curve the key material must lie on
        named_curve: NamedCurve,
    },

    /// EC key-pair generation.
    EcKeyGen {
        /// The EC algorithm family
        id: AlgorithmId,
        /// Curve to generate on
        named_curve: NamedCurve,
    },

    /// ECDSA sign/verify.
    EcdsaSignVerify {
        /// Digest applied to the message
        hash: AlgorithmId,
    },

    /// ECDH bit derivation; the peer key arrives via the operation, not
    /// the descriptor.
    EcdhDerive,

    /// AES secret-key import (all four modes).
    AesImport {
        /// The AES mode
        id: AlgorithmId,
    },

    /// AES secret-key generation.
    AesKeyGen {
        /// The AES mode
        id: AlgorithmId,
        /// Key length in bits (128, 192 or 256)
        length: u16,
    },

    /// AES-CTR encryption parameters.
    AesCtrCipher {
        /// 16-byte initial counter block
        counter: Vec<u8>,
        /// Number of counter bits (1–128)
        length: u8,
    },

    /// AES-CBC encryption parameters.
    AesCbcCipher {
        /// 16-byte initialization vector
        iv: Vec<u8>,
    },

    /// AES-GCM encryption parameters.
    AesGcmCipher {
        /// Initialization vector
        iv: Vec<u8>,
        /// Additional authenticated data
        additional_data: Option<Vec<u8>>,
        /// Authentication tag length in bits
        tag_length: u8,
    },

    /// AES-KW wrapping; parameterless.
    AesKwCipher,

    /// HMAC key import.
    HmacImport {
        /// Hash the key is bound to
        hash: AlgorithmId,
        /// Optional key length in bits
        length: Option<u32>,
    },

    /// HMAC key generation.
    HmacKeyGen {
        /// Hash the key is bound to
        hash: AlgorithmId,
        /// Optional key length in bits
        length: Option<u32>,
    },

    /// HMAC sign/verify; the key carries the hash.
    HmacSignVerify,

    /// Raw keying-material import for the KDF algorithms.
    KdfImport {
        /// HKDF or PBKDF2
        id: AlgorithmId,
    },

    /// HKDF bit derivation.
    HkdfDerive {
        /// Extract/expand hash
        hash: AlgorithmId,
        /// Extraction salt
        salt: Vec<u8>,
        /// Context/application info
        info: Vec<u8>,
    },

    /// PBKDF2 bit derivation.
    Pbkdf2Derive {
        /// PRF hash
        hash: AlgorithmId,
        /// Salt
        salt: Vec<u8>,
        /// Iteration count (at least 1)
        iterations: u32,
    },

    /// Key length query for an AES derived key.
    AesKeyLength {
        /// The AES mode
        id: AlgorithmId,
        /// Key length in bits
        length: u16,
    },

    /// Key length query for an HMAC derived key.
    HmacKeyLength {
        /// Hash the key is bound to
        hash: AlgorithmId,
        /// Optional explicit length in bits
        length: Option<u32>,
    },

    /// Key length query for HKDF/PBKDF2 keying material (caller-chosen).
    KdfKeyLength {
        /// HKDF or PBKDF2
        id: AlgorithmId,
    },
}

impl AlgorithmParams {
    /// The algorithm identifier this parameter set was resolved for.
    #[must_use]
    pub fn algorithm(&self) -> AlgorithmId {
        match self {
            Self::Digest { id }
            | Self::RsaHashedImport { id, .. }
            | Self::RsaHashedKeyGen { id, .. }
            | Self::EcImport { id, .. }
            | Self::EcKeyGen { id, .. }
            | Self::AesImport { id }
            | Self::AesKeyGen { id, .. }
            | Self::KdfImport { id }
            | Self::AesKeyLength { id, .. }
            | Self::KdfKeyLength { id } => *id,
            Self::RsassaSignVerify => AlgorithmId::RsassaPkcs1V15,
            Self::RsaPssSignVerify { .. } => AlgorithmId::RsaPss,
            Self::RsaOaepCipher { .. } => AlgorithmId::RsaOaep,
            Self::EcdsaSignVerify { .. } => AlgorithmId::Ecdsa,
            Self::EcdhDerive => AlgorithmId::Ecdh,
            Self::HkdfDerive { .. } => AlgorithmId::Hkdf,
            Self::Pbkdf2Derive { .. } => AlgorithmId::Pbkdf2,
            Self::AesCtrCipher { .. } => AlgorithmId::AesCtr,
            Self::AesCbcCipher { .. } => AlgorithmId::AesCbc,
            Self::AesGcmCipher { .. } => AlgorithmId::AesGcm,
            Self::AesKwCipher => AlgorithmId::AesKw,
            Self::HmacImport { .. } | Self::HmacKeyGen { .. } | Self::HmacKeyLength { .. } => {
                AlgorithmId::Hmac
            }
            Self::HmacSignVerify => AlgorithmId::Hmac,
        }
    }
}
