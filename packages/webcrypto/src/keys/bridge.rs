//! JWK ↔ RSA component bridge: cross-field consistency and conversion

use super::components::{PrimeInfo, RsaKeyComponents, RsaKeyKind};
use super::native::NativeRsaKey;
use crate::algorithm::AlgorithmId;
use crate::b64::{base64url_decode, base64url_encode};
use crate::error::{CryptoError, Result};
use crate::jwk::JsonWebKey;
use crate::usages::KeyUsages;

/// Which usage family an RSA algorithm belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum UsageFamily {
    Signature,
    Encryption,
}

fn usage_family(algorithm: AlgorithmId) -> Result<UsageFamily> {
    match algorithm {
        AlgorithmId::RsassaPkcs1V15 | AlgorithmId::RsaPss => Ok(UsageFamily::Signature),
        AlgorithmId::RsaOaep => Ok(UsageFamily::Encryption),
        other => Err(CryptoError::not_supported(format!(
            "{other} is not an RSA key algorithm"
        ))),
    }
}

impl UsageFamily {
    fn allowed_usages(self, kind: RsaKeyKind) -> KeyUsages {
        match (self, kind) {
            (Self::Signature, RsaKeyKind::Private) => KeyUsages::SIGN,
            (Self::Signature, RsaKeyKind::Public) => KeyUsages::VERIFY,
            (Self::Encryption, RsaKeyKind::Private) => {
                KeyUsages::DECRYPT | KeyUsages::UNWRAP_KEY
            }
            (Self::Encryption, RsaKeyKind::Public) => KeyUsages::ENCRYPT | KeyUsages::WRAP_KEY,
        }
    }

    fn use_tag(self) -> &'static str {
        match self {
            Self::Signature => "sig",
            Self::Encryption => "enc",
        }
    }
}

/// The JWA `alg` name implied by an RSA algorithm and its bound hash.
/// Hash rows without a registered name yield `None`.
fn jwk_alg_token(algorithm: AlgorithmId, hash: AlgorithmId) -> Option<&'static str> {
    match (algorithm, hash) {
        (AlgorithmId::RsassaPkcs1V15, AlgorithmId::Sha1) => Some("RS1"),
        (AlgorithmId::RsassaPkcs1V15, AlgorithmId::Sha224) => Some("RS224"),
        (AlgorithmId::RsassaPkcs1V15, AlgorithmId::Sha256) => Some("RS256"),
        (AlgorithmId::RsassaPkcs1V15, AlgorithmId::Sha384) => Some("RS384"),
        (AlgorithmId::RsassaPkcs1V15, AlgorithmId::Sha512) => Some("RS512"),
        (AlgorithmId::RsaPss, AlgorithmId::Sha256) => Some("PS256"),
        (AlgorithmId::RsaPss, AlgorithmId::Sha384) => Some("PS384"),
        (AlgorithmId::RsaPss, AlgorithmId::Sha512) => Some("PS512"),
        (AlgorithmId::RsaOaep, AlgorithmId::Sha1) => Some("RSA-OAEP"),
        (AlgorithmId::RsaOaep, AlgorithmId::Sha256) => Some("RSA-OAEP-256"),
        (AlgorithmId::RsaOaep, AlgorithmId::Sha384) => Some("RSA-OAEP-384"),
        (AlgorithmId::RsaOaep, AlgorithmId::Sha512) => Some("RSA-OAEP-512"),
        _ => None,
    }
}

fn decode_member(value: &str, member: &str) -> Result<Vec<u8>> {
    base64url_decode(value)
        .map_err(|_| CryptoError::data(format!("JWK \"{member}\" member is not valid base64url")))
}

fn decode_required(value: Option<&str>, member: &str) -> Result<Vec<u8>> {
    let value = value.ok_or_else(|| {
        CryptoError::data(format!("JWK is missing its \"{member}\" member"))
    })?;
    decode_member(value, member)
}

fn decode_optional(value: Option<&str>, member: &str) -> Result<Option<Vec<u8>>> {
    value.map(|v| decode_member(v, member)).transpose()
}

/// Convert a parsed JWK into validated RSA key components.
///
/// Enforces the cross-field rules in order: usage/key-type
/// compatibility (`SyntaxError`), then `use`, `key_ops`, `ext` and
/// `alg` consistency (`DataError`), then member decoding with the
/// one-leading-zero strip on the modulus, then the all-or-nothing rule
/// for the prime/CRT members. Never allocates a native key.
///
/// # Errors
/// `Syntax` when the requested usages do not fit the key type for the
/// algorithm family; `Data` for every structural inconsistency.
pub fn import_rsa(
    jwk: JsonWebKey,
    algorithm: AlgorithmId,
    hash: AlgorithmId,
    usages: KeyUsages,
    extractable: bool,
) -> Result<RsaKeyComponents> {
    let family = usage_family(algorithm)?;

    if jwk.kty.as_deref() != Some("RSA") {
        return Err(CryptoError::data("JWK \"kty\" member must be \"RSA\""));
    }

    let kind = if jwk.d.is_some() {
        RsaKeyKind::Private
    } else {
        RsaKeyKind::Public
    };

    if !family.allowed_usages(kind).is_superset_of(usages) {
        return Err(CryptoError::syntax(format!(
            "requested usages are not valid for an RSA {} key",
            match kind {
                RsaKeyKind::Public => "public",
                RsaKeyKind::Private => "private",
            }
        )));
    }

    if !usages.is_empty() {
        if let Some(use_) = jwk.use_.as_deref() {
            if use_ != family.use_tag() {
                return Err(CryptoError::data(format!(
                    "JWK \"use\" member must be \"{}\"",
                    family.use_tag()
                )));
            }
        }
    }

    if let Some(key_ops) = &jwk.key_ops {
        let declared = KeyUsages::from_tokens(key_ops)
            .map_err(|_| CryptoError::data("JWK \"key_ops\" member is malformed"))?;
        if !declared.is_superset_of(usages) {
            return Err(CryptoError::data(
                "JWK \"key_ops\" member does not cover the requested usages",
            ));
        }
    }

    if jwk.ext == Some(false) && extractable {
        return Err(CryptoError::data(
            "JWK is marked non-extractable but an extractable key was requested",
        ));
    }

    if let Some(alg) = jwk.alg.as_deref() {
        match jwk_alg_token(algorithm, hash) {
            Some(expected) if alg == expected => {}
            _ => {
                return Err(CryptoError::data(format!(
                    "JWK \"alg\" member \"{alg}\" does not match the {} hash",
                    hash.name()
                )));
            }
        }
    }

    let mut n = decode_required(jwk.n.as_deref(), "n")?;
    // RFC 7518 §6.3.1.1: tolerate a single superfluous zero octet on
    // the modulus.
    if n.first() == Some(&0) {
        n.remove(0);
    }
    let e = decode_required(jwk.e.as_deref(), "e")?;

    if kind == RsaKeyKind::Public {
        tracing::debug!(algorithm = %algorithm, "imported RSA public key material");
        return Ok(RsaKeyComponents::public(n, e));
    }

    let d = decode_required(jwk.d.as_deref(), "d")?;

    let crt_members = [&jwk.p, &jwk.q, &jwk.dp, &jwk.dq, &jwk.qi];
    let present = crt_members.iter().filter(|m| m.is_some()).count();
    if present != 0 && present != crt_members.len() {
        return Err(CryptoError::data(
            "JWK prime members \"p\", \"q\", \"dp\", \"dq\" and \"qi\" \
             must be either all present or all absent",
        ));
    }

    if present == 0 {
        if jwk.oth.is_some() {
            return Err(CryptoError::data(
                "JWK \"oth\" member requires the prime members to be present",
            ));
        }
        return Ok(RsaKeyComponents::private(n, e, d));
    }

    let p = decode_required(jwk.p.as_deref(), "p")?;
    let q = decode_required(jwk.q.as_deref(), "q")?;
    let dp = decode_required(jwk.dp.as_deref(), "dp")?;
    let dq = decode_required(jwk.dq.as_deref(), "dq")?;
    let qi = decode_required(jwk.qi.as_deref(), "qi")?;

    let mut other_prime_infos = Vec::new();
    if let Some(oth) = &jwk.oth {
        for entry in oth {
            other_prime_infos.push(PrimeInfo::with_coefficient(
                decode_member(&entry.r, "oth.r")?,
                decode_member(&entry.d, "oth.d")?,
                decode_member(&entry.t, "oth.t")?,
            ));
        }
    }

    tracing::debug!(
        algorithm = %algorithm,
        additional_primes = other_prime_infos.len(),
        "imported RSA private key material"
    );

    Ok(RsaKeyComponents::private_with_primes(
        n,
        e,
        d,
        PrimeInfo::new(p, dp),
        PrimeInfo::with_coefficient(q, dq, qi),
        other_prime_infos,
    ))
}

/// Serialize a native RSA key back into JWK form.
///
/// Numeric members are unpadded base64url; `key_ops` mirrors the
/// wrapper's usages, `ext` its extractability, and `alg` comes from
/// the per-hash name table (omitted for hash rows without a registered
/// JWA name).
///
/// # Errors
/// `Operation` when reading the key material back fails (see
/// [`NativeRsaKey::to_components`]).
pub fn export_rsa(
    key: &NativeRsaKey,
    algorithm: AlgorithmId,
    hash: AlgorithmId,
    usages: KeyUsages,
    extractable: bool,
) -> Result<JsonWebKey> {
    let components = key.to_components()?;

    let mut jwk = JsonWebKey {
        kty: Some("RSA".to_string()),
        alg: jwk_alg_token(algorithm, hash).map(str::to_string),
        key_ops: Some(usages.tokens().iter().map(|t| (*t).to_string()).collect()),
        ext: Some(extractable),
        n: Some(base64url_encode(components.modulus())),
        e: Some(base64url_encode(components.exponent())),
        ..JsonWebKey::default()
    };

    if components.kind() == RsaKeyKind::Private {
        let d = components.private_exponent().ok_or_else(|| {
            CryptoError::operation("RSA private key is missing its private exponent")
        })?;
        jwk.d = Some(base64url_encode(d));

        if let (Some(first), Some(second)) =
            (components.first_prime_info(), components.second_prime_info())
        {
            jwk.p = Some(base64url_encode(&first.prime_factor));
            jwk.q = Some(base64url_encode(&second.prime_factor));
            jwk.dp = Some(base64url_encode(&first.factor_crt_exponent));
            jwk.dq = Some(base64url_encode(&second.factor_crt_exponent));
            let qi = second.factor_crt_coefficient.as_deref().ok_or_else(|| {
                CryptoError::operation("RSA private key is missing its CRT coefficient")
            })?;
            jwk.qi = Some(base64url_encode(qi));
        }
    }

    tracing::debug!(algorithm = %algorithm, kind = ?components.kind(), "exported RSA key as JWK");
    Ok(jwk)
}
