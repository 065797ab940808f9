//! The SubtleCrypto-facing surface: keys, import/export, digest, and
//! key generation

use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde_json::Value;

use crate::algorithm::{normalize, AlgorithmId, AlgorithmParams, Operation};
use crate::error::{CryptoError, Result};
use crate::jwk::JsonWebKey;
use crate::keys::{export_rsa, import_rsa, NativeRsaKey, RsaKeyKind};
use crate::ops;
use crate::usages::KeyUsages;

/// WebCrypto key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Public half of an asymmetric pair
    Public,
    /// Private half of an asymmetric pair
    Private,
    /// Symmetric secret
    Secret,
}

/// WebCrypto key serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// Raw bytes
    Raw,
    /// PKCS#8 PrivateKeyInfo
    Pkcs8,
    /// SubjectPublicKeyInfo
    Spki,
    /// JSON Web Key dictionary
    Jwk,
}

/// Key material as supplied by the caller.
pub enum KeyData<'a> {
    /// Binary key data (raw/spki/pkcs8 formats)
    Bytes(&'a [u8]),
    /// A JWK dictionary (jwk format)
    Jwk(&'a Value),
}

/// Key material as returned by [`export_key`].
#[derive(Debug)]
pub enum ExportedKey {
    /// Binary key data
    Bytes(Vec<u8>),
    /// A JWK
    Jwk(JsonWebKey),
}

/// The `algorithm` reflection of an RSA key: family, bound hash,
/// modulus length in bits, and the public exponent bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaHashedKeyAlgorithm {
    /// RSA algorithm family
    pub id: AlgorithmId,
    /// Hash bound at import/generation time
    pub hash: AlgorithmId,
    /// Modulus length in bits
    pub modulus_length: u32,
    /// Public exponent, big-endian
    pub public_exponent: Vec<u8>,
}

impl RsaHashedKeyAlgorithm {
    /// Canonical algorithm name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// A key owned by the runtime: type, extractability, algorithm
/// reflection, permitted usages, and the exclusively owned native
/// handle.
pub struct CryptoKey {
    key_type: KeyType,
    extractable: bool,
    algorithm: RsaHashedKeyAlgorithm,
    usages: KeyUsages,
    handle: NativeRsaKey,
}

impl CryptoKey {
    /// Public, private or secret.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Whether [`export_key`] may release the material.
    #[must_use]
    pub fn extractable(&self) -> bool {
        self.extractable
    }

    /// Algorithm reflection.
    #[must_use]
    pub fn algorithm(&self) -> &RsaHashedKeyAlgorithm {
        &self.algorithm
    }

    /// Permitted usages.
    #[must_use]
    pub fn usages(&self) -> KeyUsages {
        self.usages
    }

    pub(crate) fn handle(&self) -> &NativeRsaKey {
        &self.handle
    }
}

impl std::fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoKey")
            .field("key_type", &self.key_type)
            .field("extractable", &self.extractable)
            .field("algorithm", &self.algorithm)
            .field("usages", &self.usages)
            .field("handle", &"<redacted>")
            .finish()
    }
}

/// The two halves produced by [`generate_key`].
pub struct CryptoKeyPair {
    /// The public key
    pub public_key: CryptoKey,
    /// The private key
    pub private_key: CryptoKey,
}

/// Import key material.
///
/// RSA keys are implemented in full for the `jwk` format; every other
/// (algorithm, format) pair resolves through the normalizer and is then
/// reported unsupported.
///
/// # Errors
/// See [`normalize`], [`JsonWebKey::parse`], [`import_rsa`] and
/// [`NativeRsaKey::build`]; each stage short-circuits on its first
/// failure.
pub fn import_key(
    format: KeyFormat,
    key_data: KeyData<'_>,
    algorithm: &Value,
    extractable: bool,
    usages: KeyUsages,
) -> Result<CryptoKey> {
    let params = normalize(algorithm, Operation::ImportKey)?;
    match params {
        AlgorithmParams::RsaHashedImport { id, hash } => {
            if format != KeyFormat::Jwk {
                return Err(CryptoError::not_supported(
                    "only \"jwk\" import is implemented for RSA keys",
                ));
            }
            let KeyData::Jwk(raw) = key_data else {
                return Err(CryptoError::data(
                    "\"jwk\" import requires dictionary key data",
                ));
            };

            let jwk = JsonWebKey::parse(raw, "RSA")?;
            let components = import_rsa(jwk, id, hash, usages, extractable)?;
            let handle = NativeRsaKey::build(&components)?;
            let key_type = match components.kind() {
                RsaKeyKind::Public => KeyType::Public,
                RsaKeyKind::Private => KeyType::Private,
            };

            tracing::debug!(
                algorithm = %id,
                modulus_length = handle.modulus_length(),
                "imported RSA key"
            );
            Ok(CryptoKey {
                key_type,
                extractable,
                algorithm: RsaHashedKeyAlgorithm {
                    id,
                    hash,
                    modulus_length: handle.modulus_length(),
                    public_exponent: handle.public_exponent().to_vec(),
                },
                usages,
                handle,
            })
        }
        other => Err(CryptoError::not_supported(format!(
            "importing {} keys is not implemented",
            other.algorithm().name()
        ))),
    }
}

/// Export a key's material.
///
/// # Errors
/// `InvalidAccess` when the key is not extractable; `NotSupported` for
/// formats other than `jwk`; otherwise see [`export_rsa`].
pub fn export_key(format: KeyFormat, key: &CryptoKey) -> Result<ExportedKey> {
    if !key.extractable {
        return Err(CryptoError::invalid_access("key is not extractable"));
    }
    match format {
        KeyFormat::Jwk => {
            let jwk = export_rsa(
                &key.handle,
                key.algorithm.id,
                key.algorithm.hash,
                key.usages,
                key.extractable,
            )?;
            Ok(ExportedKey::Jwk(jwk))
        }
        _ => Err(CryptoError::not_supported(
            "only \"jwk\" export is implemented for RSA keys",
        )),
    }
}

/// Digest `data` with the algorithm named by `descriptor`.
///
/// # Errors
/// `NotSupported` when the descriptor does not resolve to a digest
/// algorithm.
pub fn digest(descriptor: &Value, data: &[u8]) -> Result<Vec<u8>> {
    let AlgorithmParams::Digest { id } = normalize(descriptor, Operation::Digest)? else {
        unreachable!("digest normalization yields a Digest variant")
    };
    ops::digest(id, data)
}

/// Generate an RSA key pair.
///
/// Supplemental to the import/export core: supported for the three RSA
/// families, with usages split across the halves.
///
/// # Errors
/// `Syntax` when the usages do not fit the family (or are empty);
/// `Operation` for an unsupported modulus length or exponent, or a
/// generation failure; `NotSupported` for non-RSA algorithms.
pub fn generate_key(
    algorithm: &Value,
    extractable: bool,
    usages: KeyUsages,
) -> Result<CryptoKeyPair> {
    let params = normalize(algorithm, Operation::GenerateKey)?;
    let (id, modulus_length, public_exponent, hash) = match params {
        AlgorithmParams::RsaHashedKeyGen {
            id,
            modulus_length,
            public_exponent,
            hash,
        } => (id, modulus_length, public_exponent, hash),
        other => {
            return Err(CryptoError::not_supported(format!(
                "generating {} keys is not implemented",
                other.algorithm().name()
            )))
        }
    };

    let (private_mask, public_mask) = match id {
        AlgorithmId::RsassaPkcs1V15 | AlgorithmId::RsaPss => (KeyUsages::SIGN, KeyUsages::VERIFY),
        AlgorithmId::RsaOaep => (
            KeyUsages::DECRYPT | KeyUsages::UNWRAP_KEY,
            KeyUsages::ENCRYPT | KeyUsages::WRAP_KEY,
        ),
        _ => unreachable!("RsaHashedKeyGen carries an RSA family"),
    };
    if !(private_mask | public_mask).is_superset_of(usages) {
        return Err(CryptoError::syntax(format!(
            "requested usages are not valid for {}",
            id.name()
        )));
    }
    if usages.is_empty() {
        return Err(CryptoError::syntax(
            "key pair generation requires at least one usage",
        ));
    }

    if modulus_length % 8 != 0 || !(1024..=4096).contains(&modulus_length) {
        return Err(CryptoError::operation(format!(
            "unsupported RSA modulus length {modulus_length}"
        )));
    }
    // Big-endian bytes: the last octet carries the parity.
    let is_odd = public_exponent.last().is_some_and(|byte| byte % 2 == 1);
    let exponent = BigUint::from_bytes_be(&public_exponent);
    if !is_odd || exponent < BigUint::from(3u32) {
        return Err(CryptoError::operation("unsupported RSA public exponent"));
    }

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new_with_exp(&mut rng, modulus_length as usize, &exponent)
        .map_err(|err| {
            CryptoError::operation(format!("RSA key generation failed: {err}"))
        })?;
    let public_key = RsaPublicKey::from(&private_key);

    tracing::debug!(algorithm = %id, modulus_length, "generated RSA key pair");

    let make_key = |key_type: KeyType, handle: NativeRsaKey, mask: KeyUsages| CryptoKey {
        key_type,
        extractable: match key_type {
            // The public half is always extractable, as WebCrypto requires.
            KeyType::Public => true,
            _ => extractable,
        },
        algorithm: RsaHashedKeyAlgorithm {
            id,
            hash,
            modulus_length: handle.modulus_length(),
            public_exponent: handle.public_exponent().to_vec(),
        },
        usages: usages & mask,
        handle,
    };

    Ok(CryptoKeyPair {
        private_key: make_key(
            KeyType::Private,
            NativeRsaKey::from_private(private_key),
            private_mask,
        ),
        public_key: make_key(
            KeyType::Public,
            NativeRsaKey::from_public(public_key),
            public_mask,
        ),
    })
}
