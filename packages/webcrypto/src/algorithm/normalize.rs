//! Descriptor normalization: name resolution and per-field validation

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use super::{AlgorithmId, AlgorithmParams, NamedCurve, Operation};
use crate::error::{CryptoError, Result};

/// Closed name table, keyed by the uppercased algorithm name. Built
/// once; normalization from any thread reads it without locking.
static NAME_TABLE: Lazy<HashMap<&'static str, AlgorithmId>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for id in [
        AlgorithmId::RsassaPkcs1V15,
        AlgorithmId::RsaPss,
        AlgorithmId::RsaOaep,
        AlgorithmId::Ecdsa,
        AlgorithmId::Ecdh,
        AlgorithmId::AesCtr,
        AlgorithmId::AesCbc,
        AlgorithmId::AesGcm,
        AlgorithmId::AesKw,
        AlgorithmId::Hmac,
        AlgorithmId::Sha1,
        AlgorithmId::Sha224,
        AlgorithmId::Sha256,
        AlgorithmId::Sha384,
        AlgorithmId::Sha512,
        AlgorithmId::Md5,
        AlgorithmId::Hkdf,
        AlgorithmId::Pbkdf2,
    ] {
        table.insert(upper_name(id), id);
    }
    table
});

fn upper_name(id: AlgorithmId) -> &'static str {
    match id {
        AlgorithmId::RsassaPkcs1V15 => "RSASSA-PKCS1-V1_5",
        AlgorithmId::RsaPss => "RSA-PSS",
        AlgorithmId::RsaOaep => "RSA-OAEP",
        AlgorithmId::Ecdsa => "ECDSA",
        AlgorithmId::Ecdh => "ECDH",
        AlgorithmId::AesCtr => "AES-CTR",
        AlgorithmId::AesCbc => "AES-CBC",
        AlgorithmId::AesGcm => "AES-GCM",
        AlgorithmId::AesKw => "AES-KW",
        AlgorithmId::Hmac => "HMAC",
        AlgorithmId::Sha1 => "SHA-1",
        AlgorithmId::Sha224 => "SHA-224",
        AlgorithmId::Sha256 => "SHA-256",
        AlgorithmId::Sha384 => "SHA-384",
        AlgorithmId::Sha512 => "SHA-512",
        AlgorithmId::Md5 => "MD5",
        AlgorithmId::Hkdf => "HKDF",
        AlgorithmId::Pbkdf2 => "PBKDF2",
    }
}

const DIGEST_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::Sha1,
    AlgorithmId::Sha224,
    AlgorithmId::Sha256,
    AlgorithmId::Sha384,
    AlgorithmId::Sha512,
    AlgorithmId::Md5,
];

const IMPORT_KEY_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::RsassaPkcs1V15,
    AlgorithmId::RsaPss,
    AlgorithmId::RsaOaep,
    AlgorithmId::Ecdsa,
    AlgorithmId::Ecdh,
    AlgorithmId::AesCtr,
    AlgorithmId::AesCbc,
    AlgorithmId::AesGcm,
    AlgorithmId::AesKw,
    AlgorithmId::Hmac,
    AlgorithmId::Hkdf,
    AlgorithmId::Pbkdf2,
];

const GENERATE_KEY_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::RsassaPkcs1V15,
    AlgorithmId::RsaPss,
    AlgorithmId::RsaOaep,
    AlgorithmId::Ecdsa,
    AlgorithmId::Ecdh,
    AlgorithmId::AesCtr,
    AlgorithmId::AesCbc,
    AlgorithmId::AesGcm,
    AlgorithmId::AesKw,
    AlgorithmId::Hmac,
];

const SIGN_VERIFY_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::RsassaPkcs1V15,
    AlgorithmId::RsaPss,
    AlgorithmId::Ecdsa,
    AlgorithmId::Hmac,
];

const DERIVE_BITS_ALGORITHMS: &[AlgorithmId] =
    &[AlgorithmId::Ecdh, AlgorithmId::Hkdf, AlgorithmId::Pbkdf2];

const WRAP_UNWRAP_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::RsaOaep,
    AlgorithmId::AesCtr,
    AlgorithmId::AesCbc,
    AlgorithmId::AesGcm,
    AlgorithmId::AesKw,
];

const GET_KEY_LENGTH_ALGORITHMS: &[AlgorithmId] = &[
    AlgorithmId::AesCtr,
    AlgorithmId::AesCbc,
    AlgorithmId::AesGcm,
    AlgorithmId::AesKw,
    AlgorithmId::Hmac,
    AlgorithmId::Hkdf,
    AlgorithmId::Pbkdf2,
];

fn supported_set(op: Operation) -> &'static [AlgorithmId] {
    match op {
        Operation::Digest => DIGEST_ALGORITHMS,
        Operation::ImportKey => IMPORT_KEY_ALGORITHMS,
        Operation::GenerateKey => GENERATE_KEY_ALGORITHMS,
        Operation::SignVerify => SIGN_VERIFY_ALGORITHMS,
        Operation::DeriveBits => DERIVE_BITS_ALGORITHMS,
        Operation::WrapUnwrapKey => WRAP_UNWRAP_ALGORITHMS,
        Operation::GetKeyLength => GET_KEY_LENGTH_ALGORITHMS,
    }
}

/// Resolve an algorithm descriptor for an operation.
///
/// The descriptor is either a bare name or a dictionary with a `name`
/// member plus algorithm-specific parameters. Name matching is
/// case-insensitive against the closed table; each operation then
/// checks the resolved identifier against its own supported set, and
/// each required parameter is extracted and validated individually.
///
/// # Errors
/// `NotSupported` for unknown names, malformed descriptors, and
/// algorithm/operation mismatches; `Data` for missing, mistyped or
/// out-of-range parameter members.
pub fn normalize(descriptor: &Value, op: Operation) -> Result<AlgorithmParams> {
    let (name, members) = match descriptor {
        Value::String(name) => (name.as_str(), None),
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str).ok_or_else(|| {
                CryptoError::not_supported("algorithm descriptor requires a string \"name\" member")
            })?;
            (name, Some(map))
        }
        _ => {
            return Err(CryptoError::not_supported(
                "algorithm descriptor must be a name or a dictionary",
            ))
        }
    };

    let id = *NAME_TABLE
        .get(name.to_ascii_uppercase().as_str())
        .ok_or_else(|| {
            tracing::debug!(algorithm = name, "unrecognized algorithm name");
            CryptoError::not_supported(format!("unrecognized algorithm \"{name}\""))
        })?;

    if !supported_set(op).contains(&id) {
        return Err(CryptoError::not_supported(format!(
            "{} does not support the {} operation",
            id.name(),
            op.as_str()
        )));
    }

    let params = match op {
        Operation::Digest => AlgorithmParams::Digest { id },
        Operation::ImportKey => normalize_import(id, members)?,
        Operation::GenerateKey => normalize_generate(id, members)?,
        Operation::SignVerify => normalize_sign_verify(id, members)?,
        Operation::DeriveBits => normalize_derive(id, members)?,
        Operation::WrapUnwrapKey => normalize_cipher(id, members)?,
        Operation::GetKeyLength => normalize_key_length(id, members)?,
    };

    debug_assert_eq!(params.algorithm(), id);
    Ok(params)
}

fn normalize_import(id: AlgorithmId, members: Option<&Map<String, Value>>) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::RsassaPkcs1V15 | AlgorithmId::RsaPss | AlgorithmId::RsaOaep => {
            AlgorithmParams::RsaHashedImport {
                id,
                hash: require_hash(id, members)?,
            }
        }
        AlgorithmId::Ecdsa | AlgorithmId::Ecdh => AlgorithmParams::EcImport {
            id,
            named_curve: require_curve(id, members)?,
        },
        AlgorithmId::Hmac => AlgorithmParams::HmacImport {
            hash: require_hash(id, members)?,
            length: optional_bit_length(id, members)?,
        },
        AlgorithmId::AesCtr | AlgorithmId::AesCbc | AlgorithmId::AesGcm | AlgorithmId::AesKw => {
            AlgorithmParams::AesImport { id }
        }
        AlgorithmId::Hkdf | AlgorithmId::Pbkdf2 => AlgorithmParams::KdfImport { id },
        _ => unreachable!("importKey table excludes {id}"),
    })
}

fn normalize_generate(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::RsassaPkcs1V15 | AlgorithmId::RsaPss | AlgorithmId::RsaOaep => {
            AlgorithmParams::RsaHashedKeyGen {
                id,
                modulus_length: require_u32(id, members, "modulusLength")?,
                public_exponent: require_bytes(id, members, "publicExponent")?,
                hash: require_hash(id, members)?,
            }
        }
        AlgorithmId::Ecdsa | AlgorithmId::Ecdh => AlgorithmParams::EcKeyGen {
            id,
            named_curve: require_curve(id, members)?,
        },
        AlgorithmId::AesCtr | AlgorithmId::AesCbc | AlgorithmId::AesGcm | AlgorithmId::AesKw => {
            AlgorithmParams::AesKeyGen {
                id,
                length: require_aes_length(id, members)?,
            }
        }
        AlgorithmId::Hmac => AlgorithmParams::HmacKeyGen {
            hash: require_hash(id, members)?,
            length: optional_bit_length(id, members)?,
        },
        _ => unreachable!("generateKey table excludes {id}"),
    })
}

fn normalize_sign_verify(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::RsassaPkcs1V15 => AlgorithmParams::RsassaSignVerify,
        AlgorithmId::RsaPss => AlgorithmParams::RsaPssSignVerify {
            salt_length: require_u32(id, members, "saltLength")?,
        },
        AlgorithmId::Ecdsa => AlgorithmParams::EcdsaSignVerify {
            hash: require_hash(id, members)?,
        },
        AlgorithmId::Hmac => AlgorithmParams::HmacSignVerify,
        _ => unreachable!("sign/verify table excludes {id}"),
    })
}

fn normalize_derive(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::Ecdh => AlgorithmParams::EcdhDerive,
        AlgorithmId::Hkdf => AlgorithmParams::HkdfDerive {
            hash: require_hash(id, members)?,
            salt: require_bytes(id, members, "salt")?,
            info: require_bytes(id, members, "info")?,
        },
        AlgorithmId::Pbkdf2 => {
            let iterations = require_u32(id, members, "iterations")?;
            if iterations == 0 {
                return Err(member_error(id, "iterations", "must be at least 1"));
            }
            AlgorithmParams::Pbkdf2Derive {
                hash: require_hash(id, members)?,
                salt: require_bytes(id, members, "salt")?,
                iterations,
            }
        }
        _ => unreachable!("deriveBits table excludes {id}"),
    })
}

fn normalize_cipher(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::RsaOaep => AlgorithmParams::RsaOaepCipher {
            label: optional_bytes(id, members, "label")?,
        },
        AlgorithmId::AesCtr => {
            let counter = require_bytes(id, members, "counter")?;
            if counter.len() != 16 {
                return Err(member_error(id, "counter", "must be exactly 16 bytes"));
            }
            let length = require_u32(id, members, "length")?;
            if length == 0 || length > 128 {
                return Err(member_error(id, "length", "must be between 1 and 128"));
            }
            AlgorithmParams::AesCtrCipher {
                counter,
                length: length as u8,
            }
        }
        AlgorithmId::AesCbc => {
            let iv = require_bytes(id, members, "iv")?;
            if iv.len() != 16 {
                return Err(member_error(id, "iv", "must be exactly 16 bytes"));
            }
            AlgorithmParams::AesCbcCipher { iv }
        }
        AlgorithmId::AesGcm => {
            let iv = require_bytes(id, members, "iv")?;
            if iv.is_empty() {
                return Err(member_error(id, "iv", "must not be empty"));
            }
            let tag_length = match optional_u32(id, members, "tagLength")? {
                None => 128,
                Some(bits @ (32 | 64 | 96 | 104 | 112 | 120 | 128)) => bits as u8,
                Some(_) => {
                    return Err(member_error(id, "tagLength", "is not a valid tag length"));
                }
            };
            AlgorithmParams::AesGcmCipher {
                iv,
                additional_data: optional_bytes(id, members, "additionalData")?,
                tag_length,
            }
        }
        AlgorithmId::AesKw => AlgorithmParams::AesKwCipher,
        _ => unreachable!("wrap/unwrap table excludes {id}"),
    })
}

fn normalize_key_length(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<AlgorithmParams> {
    Ok(match id {
        AlgorithmId::AesCtr | AlgorithmId::AesCbc | AlgorithmId::AesGcm | AlgorithmId::AesKw => {
            AlgorithmParams::AesKeyLength {
                id,
                length: require_aes_length(id, members)?,
            }
        }
        AlgorithmId::Hmac => AlgorithmParams::HmacKeyLength {
            hash: require_hash(id, members)?,
            length: optional_bit_length(id, members)?,
        },
        AlgorithmId::Hkdf | AlgorithmId::Pbkdf2 => AlgorithmParams::KdfKeyLength { id },
        _ => unreachable!("get-key-length table excludes {id}"),
    })
}

// Per-member extraction. Every helper names the algorithm and the
// offending member so binding-layer errors stay actionable.

fn member_error(id: AlgorithmId, member: &str, detail: &str) -> CryptoError {
    CryptoError::data(format!("{}: \"{member}\" member {detail}", id.name()))
}

fn member<'a>(members: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    members.and_then(|map| map.get(key)).filter(|v| !v.is_null())
}

/// A nested `hash` member is itself a descriptor, normalized through
/// the digest table and then restricted to the SHA family.
fn require_hash(id: AlgorithmId, members: Option<&Map<String, Value>>) -> Result<AlgorithmId> {
    let value =
        member(members, "hash").ok_or_else(|| member_error(id, "hash", "is required"))?;
    let AlgorithmParams::Digest { id: hash } = normalize(value, Operation::Digest)? else {
        unreachable!("digest normalization yields a Digest variant")
    };
    if hash == AlgorithmId::Md5 {
        return Err(CryptoError::not_supported(format!(
            "{} does not accept MD5 as its hash",
            id.name()
        )));
    }
    Ok(hash)
}

fn require_curve(id: AlgorithmId, members: Option<&Map<String, Value>>) -> Result<NamedCurve> {
    let value = member(members, "namedCurve")
        .ok_or_else(|| member_error(id, "namedCurve", "is required"))?;
    let name = value
        .as_str()
        .ok_or_else(|| member_error(id, "namedCurve", "must be a string"))?;
    NamedCurve::from_name(name)
        .ok_or_else(|| CryptoError::not_supported(format!("unrecognized curve \"{name}\"")))
}

fn require_u32(id: AlgorithmId, members: Option<&Map<String, Value>>, key: &str) -> Result<u32> {
    let value = member(members, key).ok_or_else(|| member_error(id, key, "is required"))?;
    parse_u32(id, key, value)
}

fn optional_u32(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
    key: &str,
) -> Result<Option<u32>> {
    member(members, key).map(|v| parse_u32(id, key, v)).transpose()
}

fn parse_u32(id: AlgorithmId, key: &str, value: &Value) -> Result<u32> {
    let n = value
        .as_u64()
        .ok_or_else(|| member_error(id, key, "must be a non-negative integer"))?;
    u32::try_from(n).map_err(|_| member_error(id, key, "is out of range"))
}

/// Byte-sequence members arrive from the binding layer as arrays of
/// octets (the marshalled form of a `BufferSource`).
fn require_bytes(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
    key: &str,
) -> Result<Vec<u8>> {
    let value = member(members, key).ok_or_else(|| member_error(id, key, "is required"))?;
    parse_bytes(id, key, value)
}

fn optional_bytes(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
    key: &str,
) -> Result<Option<Vec<u8>>> {
    member(members, key).map(|v| parse_bytes(id, key, v)).transpose()
}

fn parse_bytes(id: AlgorithmId, key: &str, value: &Value) -> Result<Vec<u8>> {
    let items = value
        .as_array()
        .ok_or_else(|| member_error(id, key, "must be a byte sequence"))?;
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| member_error(id, key, "must contain only octets"))
        })
        .collect()
}

fn require_aes_length(id: AlgorithmId, members: Option<&Map<String, Value>>) -> Result<u16> {
    match require_u32(id, members, "length")? {
        bits @ (128 | 192 | 256) => Ok(bits as u16),
        _ => Err(member_error(id, "length", "must be 128, 192 or 256")),
    }
}

fn optional_bit_length(
    id: AlgorithmId,
    members: Option<&Map<String, Value>>,
) -> Result<Option<u32>> {
    match optional_u32(id, members, "length")? {
        Some(0) => Err(member_error(id, "length", "must not be zero")),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_name_and_dictionary_resolve_identically() {
        let bare = normalize(&json!("SHA-256"), Operation::Digest).unwrap();
        let dict = normalize(&json!({"name": "SHA-256"}), Operation::Digest).unwrap();
        assert_eq!(bare, dict);
    }

    #[test]
    fn descriptor_shape_is_checked() {
        assert!(matches!(
            normalize(&json!(42), Operation::Digest),
            Err(CryptoError::NotSupported(_))
        ));
        assert!(matches!(
            normalize(&json!({"hash": "SHA-256"}), Operation::Digest),
            Err(CryptoError::NotSupported(_))
        ));
    }

    #[test]
    fn nested_hash_rejects_md5() {
        let descriptor = json!({"name": "RSASSA-PKCS1-v1_5", "hash": "MD5"});
        assert!(matches!(
            normalize(&descriptor, Operation::ImportKey),
            Err(CryptoError::NotSupported(_))
        ));
    }

    #[test]
    fn aes_gcm_defaults_tag_length() {
        let descriptor = json!({"name": "AES-GCM", "iv": [0, 1, 2, 3]});
        let params = normalize(&descriptor, Operation::WrapUnwrapKey).unwrap();
        assert_eq!(
            params,
            AlgorithmParams::AesGcmCipher {
                iv: vec![0, 1, 2, 3],
                additional_data: None,
                tag_length: 128,
            }
        );
    }

    #[test]
    fn aes_ctr_counter_must_be_one_block() {
        let descriptor = json!({"name": "AES-CTR", "counter": vec![0u8; 15], "length": 64});
        assert!(matches!(
            normalize(&descriptor, Operation::WrapUnwrapKey),
            Err(CryptoError::Data(_))
        ));
    }
}
