//! Native RSA key handle built from validated components

use num_bigint_dig::{BigInt, ModInverse};
use num_traits::One;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use super::components::{PrimeInfo, RsaKeyComponents, RsaKeyKind};
use crate::error::{CryptoError, Result};

enum NativeKeyInner {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

/// An opaque native RSA key, exclusively owned by its wrapping
/// `CryptoKey`.
///
/// Construction is all-or-nothing: the handle is published only after
/// every component has been converted and validated, so no partially
/// built key is ever observable, and scratch big integers are dropped
/// on every failure path. The handle keeps the modulus bit length and
/// a copy of the public exponent bytes for later introspection.
pub struct NativeRsaKey {
    inner: NativeKeyInner,
    modulus_length: u32,
    public_exponent: Vec<u8>,
}

impl NativeRsaKey {
    /// Convert validated components into a native key.
    ///
    /// # Errors
    /// `Operation` when the components cannot back a native key: an
    /// empty modulus or exponent, a private set without prime/CRT
    /// parameters or with empty ones, additional primes beyond two
    /// (multi-prime keys are unsupported), or a rejection by the
    /// underlying RSA implementation.
    pub fn build(components: &RsaKeyComponents) -> Result<Self> {
        if components.modulus().is_empty() || components.exponent().is_empty() {
            return Err(CryptoError::operation(
                "RSA key components have an empty modulus or exponent",
            ));
        }

        let n = BigUint::from_bytes_be(components.modulus());
        let e = BigUint::from_bytes_be(components.exponent());
        let modulus_length = u32::try_from(n.bits())
            .map_err(|_| CryptoError::operation("RSA modulus is too large"))?;
        let public_exponent = components.exponent().to_vec();

        let inner = match components.kind() {
            RsaKeyKind::Public => {
                let key = RsaPublicKey::new(n, e).map_err(|err| {
                    CryptoError::operation(format!("failed to construct RSA public key: {err}"))
                })?;
                NativeKeyInner::Public(key)
            }
            RsaKeyKind::Private => {
                if !components.has_additional_private_key_parameters() {
                    return Err(CryptoError::operation(
                        "RSA private key requires prime and CRT parameters",
                    ));
                }
                if !components.other_prime_infos().is_empty() {
                    return Err(CryptoError::operation(
                        "multi-prime RSA keys are not supported",
                    ));
                }
                let d = components
                    .private_exponent()
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| {
                        CryptoError::operation("RSA private key has an empty private exponent")
                    })?;
                let first = components.first_prime_info().ok_or_else(|| {
                    CryptoError::operation("RSA private key is missing its first prime")
                })?;
                let second = components.second_prime_info().ok_or_else(|| {
                    CryptoError::operation("RSA private key is missing its second prime")
                })?;
                if first.prime_factor.is_empty() || second.prime_factor.is_empty() {
                    return Err(CryptoError::operation(
                        "RSA private key has an empty prime factor",
                    ));
                }

                let mut key = RsaPrivateKey::from_components(
                    n,
                    e,
                    BigUint::from_bytes_be(d),
                    vec![
                        BigUint::from_bytes_be(&first.prime_factor),
                        BigUint::from_bytes_be(&second.prime_factor),
                    ],
                )
                .map_err(|err| {
                    CryptoError::operation(format!("failed to construct RSA private key: {err}"))
                })?;
                key.precompute().map_err(|err| {
                    CryptoError::operation(format!(
                        "failed to precompute RSA CRT parameters: {err}"
                    ))
                })?;
                NativeKeyInner::Private(key)
            }
        };

        Ok(Self {
            inner,
            modulus_length,
            public_exponent,
        })
    }

    /// Public or private.
    #[must_use]
    pub fn kind(&self) -> RsaKeyKind {
        match self.inner {
            NativeKeyInner::Public(_) => RsaKeyKind::Public,
            NativeKeyInner::Private(_) => RsaKeyKind::Private,
        }
    }

    /// Bit length of the modulus.
    #[must_use]
    pub fn modulus_length(&self) -> u32 {
        self.modulus_length
    }

    /// The public exponent, big-endian.
    #[must_use]
    pub fn public_exponent(&self) -> &[u8] {
        &self.public_exponent
    }

    pub(crate) fn as_public(&self) -> Option<&RsaPublicKey> {
        match &self.inner {
            NativeKeyInner::Public(key) => Some(key),
            NativeKeyInner::Private(_) => None,
        }
    }

    pub(crate) fn as_private(&self) -> Option<&RsaPrivateKey> {
        match &self.inner {
            NativeKeyInner::Private(key) => Some(key),
            NativeKeyInner::Public(_) => None,
        }
    }

    pub(crate) fn from_private(key: RsaPrivateKey) -> Self {
        let modulus_length = key.n().bits() as u32;
        let public_exponent = key.e().to_bytes_be();
        Self {
            inner: NativeKeyInner::Private(key),
            modulus_length,
            public_exponent,
        }
    }

    pub(crate) fn from_public(key: RsaPublicKey) -> Self {
        let modulus_length = key.n().bits() as u32;
        let public_exponent = key.e().to_bytes_be();
        Self {
            inner: NativeKeyInner::Public(key),
            modulus_length,
            public_exponent,
        }
    }

    /// Read the key material back out as components.
    ///
    /// CRT exponents and the coefficient come from the precomputed
    /// state when available and are otherwise derived here
    /// (`dp = d mod (p-1)`, `dq = d mod (q-1)`, `qi = q⁻¹ mod p`).
    ///
    /// # Errors
    /// `Operation` when the private key does not carry exactly two
    /// primes or a CRT value cannot be derived. No partial component
    /// set is returned.
    pub fn to_components(&self) -> Result<RsaKeyComponents> {
        match &self.inner {
            NativeKeyInner::Public(key) => Ok(RsaKeyComponents::public(
                key.n().to_bytes_be(),
                key.e().to_bytes_be(),
            )),
            NativeKeyInner::Private(key) => {
                let primes = key.primes();
                if primes.len() != 2 {
                    return Err(CryptoError::operation(
                        "RSA private key does not carry exactly two primes",
                    ));
                }
                let (p, q) = (&primes[0], &primes[1]);
                let one = BigUint::one();

                let dp = match key.dp() {
                    Some(dp) => dp.clone(),
                    None => key.d() % &(p - &one),
                };
                let dq = match key.dq() {
                    Some(dq) => dq.clone(),
                    None => key.d() % &(q - &one),
                };
                let qi = match key.qinv().and_then(|v| v.to_biguint()) {
                    Some(qi) => qi,
                    None => crt_coefficient(p, q)?,
                };

                Ok(RsaKeyComponents::private_with_primes(
                    key.n().to_bytes_be(),
                    key.e().to_bytes_be(),
                    key.d().to_bytes_be(),
                    PrimeInfo::new(p.to_bytes_be(), dp.to_bytes_be()),
                    PrimeInfo::with_coefficient(q.to_bytes_be(), dq.to_bytes_be(), qi.to_bytes_be()),
                    Vec::new(),
                ))
            }
        }
    }
}

/// `q⁻¹ mod p`, normalized into `[0, p)`. A missing inverse is an
/// operation failure, never a silently incomplete export.
fn crt_coefficient(p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let inverse = q
        .clone()
        .mod_inverse(p)
        .ok_or_else(|| CryptoError::operation("failed to compute the RSA CRT coefficient"))?;
    let p_int = BigInt::from(p.clone());
    let normalized = ((inverse % &p_int) + &p_int) % &p_int;
    normalized
        .to_biguint()
        .ok_or_else(|| CryptoError::operation("failed to compute the RSA CRT coefficient"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_empty_modulus() {
        let components = RsaKeyComponents::public(Vec::new(), vec![0x01, 0x00, 0x01]);
        assert!(matches!(
            NativeRsaKey::build(&components),
            Err(CryptoError::Operation(_))
        ));
    }

    #[test]
    fn build_rejects_private_without_crt_parameters() {
        let components = RsaKeyComponents::private(vec![0x05], vec![0x03], vec![0x02]);
        assert!(matches!(
            NativeRsaKey::build(&components),
            Err(CryptoError::Operation(_))
        ));
    }

    #[test]
    fn build_rejects_multi_prime_keys() {
        let components = RsaKeyComponents::private_with_primes(
            vec![0x05],
            vec![0x03],
            vec![0x02],
            PrimeInfo::new(vec![0x03], vec![0x01]),
            PrimeInfo::with_coefficient(vec![0x05], vec![0x01], vec![0x01]),
            vec![PrimeInfo::new(vec![0x07], vec![0x01])],
        );
        assert!(matches!(
            NativeRsaKey::build(&components),
            Err(CryptoError::Operation(_))
        ));
    }

    #[test]
    fn crt_coefficient_matches_known_inverse() {
        // 11⁻¹ mod 7 == 2
        let p = BigUint::from(7u32);
        let q = BigUint::from(11u32);
        assert_eq!(crt_coefficient(&p, &q).unwrap(), BigUint::from(2u32));
    }
}
