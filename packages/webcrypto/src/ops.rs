//! Stateless digest, sign and verify operations

use md5::Md5;
use rsa::Pkcs1v15Sign;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::algorithm::AlgorithmId;
use crate::error::{CryptoError, Result};
use crate::subtle::{CryptoKey, KeyType};
use crate::usages::KeyUsages;

/// One-shot digest.
///
/// # Errors
/// `NotSupported` when the identifier is not a digest algorithm.
pub fn digest(hash: AlgorithmId, data: &[u8]) -> Result<Vec<u8>> {
    Ok(match hash {
        AlgorithmId::Sha1 => Sha1::digest(data).to_vec(),
        AlgorithmId::Sha224 => Sha224::digest(data).to_vec(),
        AlgorithmId::Sha256 => Sha256::digest(data).to_vec(),
        AlgorithmId::Sha384 => Sha384::digest(data).to_vec(),
        AlgorithmId::Sha512 => Sha512::digest(data).to_vec(),
        AlgorithmId::Md5 => Md5::digest(data).to_vec(),
        other => {
            return Err(CryptoError::not_supported(format!(
                "{other} is not a digest algorithm"
            )))
        }
    })
}

/// Digest output size in bytes.
#[must_use]
pub fn digest_size(hash: AlgorithmId) -> Option<usize> {
    match hash {
        AlgorithmId::Sha1 => Some(20),
        AlgorithmId::Sha224 => Some(28),
        AlgorithmId::Sha256 => Some(32),
        AlgorithmId::Sha384 => Some(48),
        AlgorithmId::Sha512 => Some(64),
        AlgorithmId::Md5 => Some(16),
        _ => None,
    }
}

/// PKCS#1 v1.5 signature padding for a prehashed digest.
fn pkcs1v15_padding(hash: AlgorithmId) -> Result<Pkcs1v15Sign> {
    Ok(match hash {
        AlgorithmId::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        AlgorithmId::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        AlgorithmId::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        AlgorithmId::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        AlgorithmId::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        other => {
            return Err(CryptoError::not_supported(format!(
                "{other} cannot be used for RSA signatures"
            )))
        }
    })
}

/// Produce a PKCS#1 v1.5 signature over `data` with the key's bound
/// hash.
///
/// # Errors
/// `InvalidAccess` unless the key is a private key permitted to sign;
/// `Operation` when the underlying primitive fails.
pub fn sign(key: &CryptoKey, data: &[u8]) -> Result<Vec<u8>> {
    if key.key_type() != KeyType::Private {
        return Err(CryptoError::invalid_access(
            "signing requires a private key",
        ));
    }
    if !key.usages().contains(KeyUsages::SIGN) {
        return Err(CryptoError::invalid_access(
            "key does not permit the sign usage",
        ));
    }
    let private_key = key
        .handle()
        .as_private()
        .ok_or_else(|| CryptoError::operation("key handle is not an RSA private key"))?;

    let hash = key.algorithm().hash;
    let hashed = digest(hash, data)?;
    private_key
        .sign(pkcs1v15_padding(hash)?, &hashed)
        .map_err(|err| CryptoError::operation(format!("RSA signing failed: {err}")))
}

/// Check a PKCS#1 v1.5 signature over `data`.
///
/// A signature that does not match is `Ok(false)`, not an error.
///
/// # Errors
/// `InvalidAccess` unless the key is a public key permitted to verify.
pub fn verify(key: &CryptoKey, signature: &[u8], data: &[u8]) -> Result<bool> {
    if key.key_type() != KeyType::Public {
        return Err(CryptoError::invalid_access(
            "verification requires a public key",
        ));
    }
    if !key.usages().contains(KeyUsages::VERIFY) {
        return Err(CryptoError::invalid_access(
            "key does not permit the verify usage",
        ));
    }
    let public_key = key
        .handle()
        .as_public()
        .ok_or_else(|| CryptoError::operation("key handle is not an RSA public key"))?;

    let hash = key.algorithm().hash;
    let hashed = digest(hash, data)?;
    Ok(public_key
        .verify(pkcs1v15_padding(hash)?, &hashed, signature)
        .is_ok())
}
