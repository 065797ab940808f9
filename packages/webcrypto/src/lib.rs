//! Web Cryptography key-material engine for the Kestrel runtime.
//!
//! Resolves untyped algorithm descriptors into closed, validated
//! parameter sets and handles RSA key material end to end: JWK parsing
//! and consistency checking, native key construction over big-integer
//! components, JWK export with CRT derivation, and the digest /
//! PKCS#1 v1.5 sign / verify operations.
//!
//! Everything here is synchronous and reentrant; the only process-wide
//! state is the algorithm name table, built once. The host binding
//! layer marshals engine values to and from the plain data types this
//! crate consumes.

#![forbid(unsafe_code)]

pub mod algorithm;
mod b64;
pub mod error;
pub mod jwk;
pub mod keys;
pub mod ops;
pub mod subtle;
pub mod usages;

// Re-export error types
pub use error::{CryptoError, Result};

// The normalization surface
pub use algorithm::{normalize, AlgorithmId, AlgorithmParams, NamedCurve, Operation};

// Key material types
pub use jwk::{JsonWebKey, RsaOtherPrime};
pub use keys::{NativeRsaKey, PrimeInfo, RsaKeyComponents, RsaKeyKind};
pub use usages::KeyUsages;

// The SubtleCrypto-facing operations
pub use ops::{sign, verify};
pub use subtle::{
    digest, export_key, generate_key, import_key, CryptoKey, CryptoKeyPair, ExportedKey,
    KeyData, KeyFormat, KeyType, RsaHashedKeyAlgorithm,
};
