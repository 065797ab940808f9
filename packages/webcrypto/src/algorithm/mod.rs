//! Algorithm identifiers, operations, and descriptor normalization

mod normalize;
mod params;

pub use normalize::normalize;
pub use params::AlgorithmParams;

/// Closed set of algorithm identifiers the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// RSASSA-PKCS1-v1_5 (RFC 3447 §8.2 signatures)
    RsassaPkcs1V15,
    /// RSA-PSS
    RsaPss,
    /// RSA-OAEP
    RsaOaep,
    /// ECDSA
    Ecdsa,
    /// ECDH
    Ecdh,
    /// AES in counter mode
    AesCtr,
    /// AES in CBC mode
    AesCbc,
    /// AES in Galois/counter mode
    AesGcm,
    /// AES key wrapping (RFC 3394)
    AesKw,
    /// HMAC
    Hmac,
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// MD5 (digest operation only)
    Md5,
    /// HKDF
    Hkdf,
    /// PBKDF2
    Pbkdf2,
}

impl AlgorithmId {
    /// Canonical WebCrypto spelling of the algorithm name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RsassaPkcs1V15 => "RSASSA-PKCS1-v1_5",
            Self::RsaPss => "RSA-PSS",
            Self::RsaOaep => "RSA-OAEP",
            Self::Ecdsa => "ECDSA",
            Self::Ecdh => "ECDH",
            Self::AesCtr => "AES-CTR",
            Self::AesCbc => "AES-CBC",
            Self::AesGcm => "AES-GCM",
            Self::AesKw => "AES-KW",
            Self::Hmac => "HMAC",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Md5 => "MD5",
            Self::Hkdf => "HKDF",
            Self::Pbkdf2 => "PBKDF2",
        }
    }

    /// True for the digest algorithms.
    #[must_use]
    pub fn is_hash(self) -> bool {
        matches!(
            self,
            Self::Sha1 | Self::Sha224 | Self::Sha256 | Self::Sha384 | Self::Sha512 | Self::Md5
        )
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The WebCrypto operations a descriptor can be normalized for.
///
/// Each operation owns its own table of supported algorithms; see
/// [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `digest()`
    Digest,
    /// `importKey()` / `unwrapKey()` key parsing
    ImportKey,
    /// `generateKey()`
    GenerateKey,
    /// `sign()` / `verify()`
    SignVerify,
    /// `deriveBits()` / `deriveKey()`
    DeriveBits,
    /// `encrypt()` / `decrypt()` / `wrapKey()` / `unwrapKey()`
    WrapUnwrapKey,
    /// "get key length" for derived-key algorithms
    GetKeyLength,
}

impl Operation {
    /// Operation name as it appears in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Digest => "digest",
            Self::ImportKey => "importKey",
            Self::GenerateKey => "generateKey",
            Self::SignVerify => "sign/verify",
            Self::DeriveBits => "deriveBits",
            Self::WrapUnwrapKey => "encrypt/decrypt/wrapKey/unwrapKey",
            Self::GetKeyLength => "get key length",
        }
    }
}

/// Named elliptic curves accepted by the EC algorithm parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    /// NIST P-256
    P256,
    /// NIST P-384
    P384,
    /// NIST P-521
    P521,
}

impl NamedCurve {
    /// Resolve a curve name. Curve names are matched case-sensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(Self::P256),
            "P-384" => Some(Self::P384),
            "P-521" => Some(Self::P521),
            _ => None,
        }
    }

    /// Canonical curve name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }
}
