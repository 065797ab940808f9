//! Typed, validated RSA key components

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Whether a component set describes a public or a private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaKeyKind {
    /// Modulus and public exponent only
    Public,
    /// Modulus, public exponent and private exponent, optionally with
    /// prime/CRT data
    Private,
}

/// One prime factor with its CRT exponent and (for the second and
/// later primes) its CRT coefficient. Byte strings are big-endian
/// unsigned integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrimeInfo {
    /// The prime factor
    pub prime_factor: Vec<u8>,
    /// d mod (prime - 1)
    pub factor_crt_exponent: Vec<u8>,
    /// CRT coefficient; absent on the first prime
    pub factor_crt_coefficient: Option<Vec<u8>>,
}

impl PrimeInfo {
    /// A prime with its CRT exponent and no coefficient.
    #[must_use]
    pub fn new(prime_factor: Vec<u8>, factor_crt_exponent: Vec<u8>) -> Self {
        Self {
            prime_factor,
            factor_crt_exponent,
            factor_crt_coefficient: None,
        }
    }

    /// A prime with its CRT exponent and coefficient.
    #[must_use]
    pub fn with_coefficient(
        prime_factor: Vec<u8>,
        factor_crt_exponent: Vec<u8>,
        factor_crt_coefficient: Vec<u8>,
    ) -> Self {
        Self {
            prime_factor,
            factor_crt_exponent,
            factor_crt_coefficient: Some(factor_crt_coefficient),
        }
    }
}

/// Validated RSA key material, decoded from a JWK or read back from a
/// native key.
///
/// The three constructors are the only way to build a value, so the
/// shape invariants hold by construction: a public set carries exactly
/// modulus + exponent, a private set always carries the private
/// exponent, and prime/CRT data is either fully present (both prime
/// infos) or fully absent.
#[derive(Debug, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct RsaKeyComponents {
    #[zeroize(skip)]
    kind: RsaKeyKind,
    modulus: Vec<u8>,
    exponent: Vec<u8>,
    private_exponent: Option<Vec<u8>>,
    first_prime_info: Option<PrimeInfo>,
    second_prime_info: Option<PrimeInfo>,
    other_prime_infos: Vec<PrimeInfo>,
}

impl RsaKeyComponents {
    /// Components of a public key: modulus and public exponent.
    #[must_use]
    pub fn public(modulus: Vec<u8>, exponent: Vec<u8>) -> Self {
        Self {
            kind: RsaKeyKind::Public,
            modulus,
            exponent,
            private_exponent: None,
            first_prime_info: None,
            second_prime_info: None,
            other_prime_infos: Vec::new(),
        }
    }

    /// Components of a private key without prime/CRT data.
    #[must_use]
    pub fn private(modulus: Vec<u8>, exponent: Vec<u8>, private_exponent: Vec<u8>) -> Self {
        Self {
            kind: RsaKeyKind::Private,
            modulus,
            exponent,
            private_exponent: Some(private_exponent),
            first_prime_info: None,
            second_prime_info: None,
            other_prime_infos: Vec::new(),
        }
    }

    /// Components of a private key with full prime/CRT data. Additional
    /// primes beyond the first two ride in `other_prime_infos`.
    #[must_use]
    pub fn private_with_primes(
        modulus: Vec<u8>,
        exponent: Vec<u8>,
        private_exponent: Vec<u8>,
        first_prime_info: PrimeInfo,
        second_prime_info: PrimeInfo,
        other_prime_infos: Vec<PrimeInfo>,
    ) -> Self {
        Self {
            kind: RsaKeyKind::Private,
            modulus,
            exponent,
            private_exponent: Some(private_exponent),
            first_prime_info: Some(first_prime_info),
            second_prime_info: Some(second_prime_info),
            other_prime_infos,
        }
    }

    /// Public or private.
    #[must_use]
    pub fn kind(&self) -> RsaKeyKind {
        self.kind
    }

    /// The modulus, big-endian.
    #[must_use]
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// The public exponent, big-endian.
    #[must_use]
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// The private exponent; always present on a private set.
    #[must_use]
    pub fn private_exponent(&self) -> Option<&[u8]> {
        self.private_exponent.as_deref()
    }

    /// First prime info, when prime/CRT data is present.
    #[must_use]
    pub fn first_prime_info(&self) -> Option<&PrimeInfo> {
        self.first_prime_info.as_ref()
    }

    /// Second prime info, when prime/CRT data is present.
    #[must_use]
    pub fn second_prime_info(&self) -> Option<&PrimeInfo> {
        self.second_prime_info.as_ref()
    }

    /// Primes beyond the first two.
    #[must_use]
    pub fn other_prime_infos(&self) -> &[PrimeInfo] {
        &self.other_prime_infos
    }

    /// True when the prime/CRT parameter block is present.
    #[must_use]
    pub fn has_additional_private_key_parameters(&self) -> bool {
        self.first_prime_info.is_some() && self.second_prime_info.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_components_carry_no_private_material() {
        let components = RsaKeyComponents::public(vec![1, 2, 3], vec![1, 0, 1]);
        assert_eq!(components.kind(), RsaKeyKind::Public);
        assert!(components.private_exponent().is_none());
        assert!(!components.has_additional_private_key_parameters());
    }

    #[test]
    fn additional_parameters_require_both_prime_infos() {
        let bare = RsaKeyComponents::private(vec![1], vec![2], vec![3]);
        assert!(!bare.has_additional_private_key_parameters());

        let full = RsaKeyComponents::private_with_primes(
            vec![1],
            vec![2],
            vec![3],
            PrimeInfo::new(vec![4], vec![5]),
            PrimeInfo::with_coefficient(vec![6], vec![7], vec![8]),
            Vec::new(),
        );
        assert!(full.has_additional_private_key_parameters());
    }
}
