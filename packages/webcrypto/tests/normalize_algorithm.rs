//! Normalization contract: name resolution, per-operation tables, and
//! parameter validation.

use kestrel_webcrypto::{normalize, AlgorithmId, AlgorithmParams, CryptoError, Operation};
use serde_json::json;

const ALL_OPERATIONS: [Operation; 7] = [
    Operation::Digest,
    Operation::ImportKey,
    Operation::GenerateKey,
    Operation::SignVerify,
    Operation::DeriveBits,
    Operation::WrapUnwrapKey,
    Operation::GetKeyLength,
];

#[test]
fn digest_names_resolve_case_insensitively() {
    for (canonical, id) in [
        ("SHA-1", AlgorithmId::Sha1),
        ("SHA-224", AlgorithmId::Sha224),
        ("SHA-256", AlgorithmId::Sha256),
        ("SHA-384", AlgorithmId::Sha384),
        ("SHA-512", AlgorithmId::Sha512),
        ("MD5", AlgorithmId::Md5),
    ] {
        let lower = canonical.to_lowercase();
        let mixed: String = canonical
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i % 2 == 0 {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        for spelling in [canonical.to_string(), lower, mixed] {
            let params = normalize(&json!(spelling), Operation::Digest).unwrap();
            assert_eq!(params, AlgorithmParams::Digest { id }, "for {spelling}");
        }
    }
}

#[test]
fn unknown_names_fail_for_every_operation() {
    for op in ALL_OPERATIONS {
        assert!(
            matches!(
                normalize(&json!("RSAES-PKCS1-v1_5"), op),
                Err(CryptoError::NotSupported(_))
            ),
            "for {op:?}"
        );
    }
}

#[test]
fn operations_own_their_supported_sets() {
    // A digest algorithm is not a signing algorithm, and vice versa.
    let err = normalize(&json!("SHA-256"), Operation::SignVerify).unwrap_err();
    match err {
        CryptoError::NotSupported(msg) => assert!(msg.contains("sign/verify"), "got {msg}"),
        other => panic!("expected NotSupportedError, got {other:?}"),
    }

    assert!(matches!(
        normalize(&json!("RSASSA-PKCS1-v1_5"), Operation::Digest),
        Err(CryptoError::NotSupported(_))
    ));
    assert!(matches!(
        normalize(&json!("AES-GCM"), Operation::SignVerify),
        Err(CryptoError::NotSupported(_))
    ));
    assert!(matches!(
        normalize(&json!("HKDF"), Operation::GenerateKey),
        Err(CryptoError::NotSupported(_))
    ));
}

#[test]
fn rsa_import_requires_a_hash_member() {
    let err = normalize(&json!("RSASSA-PKCS1-v1_5"), Operation::ImportKey).unwrap_err();
    match err {
        CryptoError::Data(msg) => assert!(msg.contains("hash"), "got {msg}"),
        other => panic!("expected DataError, got {other:?}"),
    }
}

#[test]
fn nested_hash_is_normalized_recursively() {
    // Both a bare name and a dictionary resolve, case-insensitively.
    for hash in [json!("sha-384"), json!({ "name": "Sha-384" })] {
        let descriptor = json!({ "name": "rsa-oaep", "hash": hash });
        let params = normalize(&descriptor, Operation::ImportKey).unwrap();
        assert_eq!(
            params,
            AlgorithmParams::RsaHashedImport {
                id: AlgorithmId::RsaOaep,
                hash: AlgorithmId::Sha384,
            }
        );
    }

    // An unknown nested hash surfaces the digest-table failure.
    let descriptor = json!({ "name": "HMAC", "hash": "SHA-3" });
    assert!(matches!(
        normalize(&descriptor, Operation::ImportKey),
        Err(CryptoError::NotSupported(_))
    ));
}

#[test]
fn rsa_key_generation_extracts_every_member() {
    let descriptor = json!({
        "name": "RSASSA-PKCS1-v1_5",
        "modulusLength": 2048,
        "publicExponent": [1, 0, 1],
        "hash": "SHA-256",
    });
    let params = normalize(&descriptor, Operation::GenerateKey).unwrap();
    assert_eq!(
        params,
        AlgorithmParams::RsaHashedKeyGen {
            id: AlgorithmId::RsassaPkcs1V15,
            modulus_length: 2048,
            public_exponent: vec![1, 0, 1],
            hash: AlgorithmId::Sha256,
        }
    );

    // Each required member is validated individually.
    let missing_exponent = json!({
        "name": "RSASSA-PKCS1-v1_5",
        "modulusLength": 2048,
        "hash": "SHA-256",
    });
    let err = normalize(&missing_exponent, Operation::GenerateKey).unwrap_err();
    match err {
        CryptoError::Data(msg) => assert!(msg.contains("publicExponent"), "got {msg}"),
        other => panic!("expected DataError, got {other:?}"),
    }

    let bad_modulus = json!({
        "name": "RSASSA-PKCS1-v1_5",
        "modulusLength": "2048",
        "publicExponent": [1, 0, 1],
        "hash": "SHA-256",
    });
    assert!(matches!(
        normalize(&bad_modulus, Operation::GenerateKey),
        Err(CryptoError::Data(_))
    ));
}

#[test]
fn pbkdf2_validates_its_iteration_count() {
    let descriptor = json!({
        "name": "PBKDF2",
        "hash": "SHA-256",
        "salt": [0, 1, 2, 3],
        "iterations": 0,
    });
    assert!(matches!(
        normalize(&descriptor, Operation::DeriveBits),
        Err(CryptoError::Data(_))
    ));

    let descriptor = json!({
        "name": "PBKDF2",
        "hash": "SHA-256",
        "salt": [0, 1, 2, 3],
        "iterations": 100_000,
    });
    let params = normalize(&descriptor, Operation::DeriveBits).unwrap();
    assert_eq!(
        params,
        AlgorithmParams::Pbkdf2Derive {
            hash: AlgorithmId::Sha256,
            salt: vec![0, 1, 2, 3],
            iterations: 100_000,
        }
    );
}

#[test]
fn hkdf_requires_salt_and_info() {
    let descriptor = json!({ "name": "HKDF", "hash": "SHA-256", "salt": [1, 2] });
    let err = normalize(&descriptor, Operation::DeriveBits).unwrap_err();
    match err {
        CryptoError::Data(msg) => assert!(msg.contains("info"), "got {msg}"),
        other => panic!("expected DataError, got {other:?}"),
    }
}

#[test]
fn ec_descriptors_validate_their_curve() {
    let descriptor = json!({ "name": "ECDSA", "namedCurve": "P-384" });
    let params = normalize(&descriptor, Operation::ImportKey).unwrap();
    assert_eq!(
        params,
        AlgorithmParams::EcImport {
            id: AlgorithmId::Ecdsa,
            named_curve: kestrel_webcrypto::NamedCurve::P384,
        }
    );

    // Curve names stay case-sensitive even though algorithm names are not.
    let descriptor = json!({ "name": "ECDSA", "namedCurve": "p-384" });
    assert!(matches!(
        normalize(&descriptor, Operation::ImportKey),
        Err(CryptoError::NotSupported(_))
    ));
}

#[test]
fn aes_generation_accepts_only_standard_lengths() {
    for (length, ok) in [(128, true), (192, true), (256, true), (160, false)] {
        let descriptor = json!({ "name": "AES-GCM", "length": length });
        let result = normalize(&descriptor, Operation::GenerateKey);
        assert_eq!(result.is_ok(), ok, "for {length}");
    }
}

#[test]
fn hmac_length_zero_is_rejected() {
    let descriptor = json!({ "name": "HMAC", "hash": "SHA-256", "length": 0 });
    assert!(matches!(
        normalize(&descriptor, Operation::ImportKey),
        Err(CryptoError::Data(_))
    ));
}

#[test]
fn resolved_params_report_their_algorithm() {
    let cases = [
        (json!("SHA-1"), Operation::Digest, AlgorithmId::Sha1),
        (
            json!({ "name": "RSA-PSS", "saltLength": 32 }),
            Operation::SignVerify,
            AlgorithmId::RsaPss,
        ),
        (
            json!({ "name": "AES-KW", "length": 256 }),
            Operation::GetKeyLength,
            AlgorithmId::AesKw,
        ),
        (json!("ECDH"), Operation::DeriveBits, AlgorithmId::Ecdh),
    ];
    for (descriptor, op, id) in cases {
        assert_eq!(normalize(&descriptor, op).unwrap().algorithm(), id);
    }
}
