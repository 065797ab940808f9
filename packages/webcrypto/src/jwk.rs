//! JSON Web Key parsing and the serde model for export (RFC 7517/7518)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CryptoError, Result};
use crate::usages::KeyUsages;

/// One entry of the `oth` member: an additional prime triple.
///
/// All three members are required within an entry (RFC 7518 §6.3.2.7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaOtherPrime {
    /// Prime factor
    pub r: String,
    /// Factor CRT exponent
    pub d: String,
    /// Factor CRT coefficient
    pub t: String,
}

/// A parsed JSON Web Key.
///
/// Built exactly once from an untrusted dictionary by [`JsonWebKey::parse`]
/// and immutable afterwards; the RSA bridge consumes it by value. Every
/// member is optional at this layer. Cross-field consistency belongs to
/// the bridge, not the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type ("RSA", "EC", "oct")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    /// Intended use ("sig" or "enc")
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    /// Permitted operations, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    /// JWA algorithm name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Extractability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
    /// EC curve name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// EC x coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// RSA modulus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// RSA private exponent (or EC private scalar)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// RSA first prime factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// RSA second prime factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// First factor CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// Second factor CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// First CRT coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    /// Symmetric key material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// Additional prime triples beyond the first two
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oth: Option<Vec<RsaOtherPrime>>,
}

impl JsonWebKey {
    /// Parse an untrusted JWK dictionary.
    ///
    /// Each member is extracted independently: absence is never an
    /// error, but a present member with the wrong type is. `kty` must
    /// be present and case-sensitively equal to `required_kty`.
    ///
    /// # Errors
    /// `Data` for a non-dictionary input, a `kty` mismatch, any
    /// mistyped member, a malformed `key_ops` sequence (unknown token
    /// or duplicate), or a malformed `oth` entry.
    pub fn parse(raw: &Value, required_kty: &str) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| CryptoError::data("JWK key data is not a dictionary"))?;

        let kty = string_member(map, "kty")?;
        if kty.as_deref() != Some(required_kty) {
            return Err(CryptoError::data(format!(
                "JWK \"kty\" member must be \"{required_kty}\""
            )));
        }

        Ok(Self {
            kty,
            use_: string_member(map, "use")?,
            key_ops: key_ops_member(map)?,
            alg: string_member(map, "alg")?,
            ext: bool_member(map, "ext")?,
            crv: string_member(map, "crv")?,
            x: string_member(map, "x")?,
            y: string_member(map, "y")?,
            n: string_member(map, "n")?,
            e: string_member(map, "e")?,
            d: string_member(map, "d")?,
            p: string_member(map, "p")?,
            q: string_member(map, "q")?,
            dp: string_member(map, "dp")?,
            dq: string_member(map, "dq")?,
            qi: string_member(map, "qi")?,
            k: string_member(map, "k")?,
            oth: oth_member(map)?,
        })
    }
}

fn string_member(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CryptoError::data(format!(
            "JWK \"{key}\" member must be a string"
        ))),
    }
}

fn bool_member(map: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(CryptoError::data(format!(
            "JWK \"{key}\" member must be a boolean"
        ))),
    }
}

/// `key_ops` must be a finite sequence of canonical usage tokens with
/// no duplicates. Order is preserved for re-export.
fn key_ops_member(map: &Map<String, Value>) -> Result<Option<Vec<String>>> {
    let value = match map.get("key_ops") {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let items = value
        .as_array()
        .ok_or_else(|| CryptoError::data("JWK \"key_ops\" member must be a sequence"))?;

    let mut seen = KeyUsages::empty();
    let mut ops = Vec::with_capacity(items.len());
    for item in items {
        let token = item
            .as_str()
            .ok_or_else(|| CryptoError::data("JWK \"key_ops\" entries must be strings"))?;
        let flag = KeyUsages::parse_token(token).ok_or_else(|| {
            CryptoError::data(format!("JWK \"key_ops\" contains unknown usage \"{token}\""))
        })?;
        if seen.contains(flag) {
            return Err(CryptoError::data(format!(
                "JWK \"key_ops\" contains duplicate usage \"{token}\""
            )));
        }
        seen |= flag;
        ops.push(token.to_string());
    }
    Ok(Some(ops))
}

fn oth_member(map: &Map<String, Value>) -> Result<Option<Vec<RsaOtherPrime>>> {
    let value = match map.get("oth") {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let items = value
        .as_array()
        .ok_or_else(|| CryptoError::data("JWK \"oth\" member must be a sequence"))?;

    let mut primes = Vec::with_capacity(items.len());
    for item in items {
        let entry = item
            .as_object()
            .ok_or_else(|| CryptoError::data("JWK \"oth\" entries must be dictionaries"))?;
        let triple = |key: &str| -> Result<String> {
            entry
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    CryptoError::data(format!(
                        "JWK \"oth\" entry is missing its \"{key}\" member"
                    ))
                })
        };
        primes.push(RsaOtherPrime {
            r: triple("r")?,
            d: triple("d")?,
            t: triple("t")?,
        });
    }
    Ok(Some(primes))
}
