//! X.509 encoder against the checked-in certificate fixtures
//!
//! Expected key parameters and thumbprints were computed independently with
//! OpenSSL when the fixtures were generated.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use jwks_core::{
    certificate_to_jwks, Certificate, CertificateInclusionMode, EncodeError, JwksError,
    JwksOptions, KeyEncoder, KeyUsage, X509KeyEncoder,
};
use jwks_test_utils::*;
use serde_json::Value;

fn encode(cert: &Certificate, usage: KeyUsage, inclusion: CertificateInclusionMode) -> Value {
    let jwk = X509KeyEncoder::new().encode(cert, usage, inclusion).unwrap();
    serde_json::to_value(jwk).unwrap()
}

// ============================================================================
// Key Parameters
// ============================================================================

#[test]
fn test_rsa_verification_key() {
    let key = encode(&rsa_leaf(), KeyUsage::Verification, CertificateInclusionMode::None);

    assert_eq!(key["kty"], "RSA");
    assert_eq!(key["e"], "AQAB");
    assert!(key["n"].as_str().unwrap().starts_with(RSA_LEAF_N_PREFIX));
    // 2048-bit modulus, no leading zero byte: 256 bytes -> 342 base64url chars
    assert_eq!(key["n"].as_str().unwrap().len(), 342);
    assert_eq!(key["kid"], RSA_LEAF_KID);
    assert_eq!(key["use"], "sig");
    assert_eq!(key["alg"], "RS256");
    assert!(key.get("x5c").is_none());
    assert!(key.get("x5t").is_none());
    assert!(key.get("x5t#S256").is_none());
}

#[test]
fn test_rsa_encryption_key() {
    let key = encode(&rsa_leaf(), KeyUsage::Encryption, CertificateInclusionMode::None);

    assert_eq!(key["use"], "enc");
    assert_eq!(key["alg"], "RSA-OAEP-256");
    assert_eq!(key["kid"], RSA_LEAF_KID);
}

#[test]
fn test_ec_p256_key() {
    let key = encode(&ec_p256(), KeyUsage::Verification, CertificateInclusionMode::None);

    assert_eq!(key["kty"], "EC");
    assert_eq!(key["crv"], "P-256");
    assert_eq!(key["x"], EC_P256_X);
    assert_eq!(key["y"], EC_P256_Y);
    assert_eq!(key["kid"], EC_P256_KID);
    assert_eq!(key["alg"], "ES256");
}

#[test]
fn test_ec_p384_key() {
    let key = encode(&ec_p384(), KeyUsage::Verification, CertificateInclusionMode::None);

    assert_eq!(key["crv"], "P-384");
    assert_eq!(key["x"], EC_P384_X);
    assert_eq!(key["y"], EC_P384_Y);
    assert_eq!(key["kid"], EC_P384_KID);
    assert_eq!(key["alg"], "ES384");
}

#[test]
fn test_ec_encryption_uses_ecdh() {
    let key = encode(&ec_p256(), KeyUsage::Encryption, CertificateInclusionMode::None);

    assert_eq!(key["use"], "enc");
    assert_eq!(key["alg"], "ECDH-ES");
}

#[test]
fn test_ed25519_key() {
    let key = encode(&ed25519(), KeyUsage::Verification, CertificateInclusionMode::None);

    assert_eq!(key["kty"], "OKP");
    assert_eq!(key["crv"], "Ed25519");
    assert_eq!(key["x"], ED25519_X);
    assert_eq!(key["kid"], ED25519_KID);
    assert_eq!(key["alg"], "EdDSA");
    assert!(key.get("y").is_none());
}

#[test]
fn test_ed25519_encryption_unsupported() {
    let result = X509KeyEncoder::new().encode(
        &ed25519(),
        KeyUsage::Encryption,
        CertificateInclusionMode::None,
    );

    assert_eq!(
        result.unwrap_err(),
        EncodeError::UnsupportedUsage {
            key_type: "OKP".to_string(),
            usage: KeyUsage::Encryption,
        }
    );
}

// ============================================================================
// Certificate Members
// ============================================================================

#[test]
fn test_end_entity_only() {
    let key = encode(&rsa_chain(), KeyUsage::Verification, CertificateInclusionMode::EndEntityOnly);

    let x5c = key["x5c"].as_array().unwrap();
    assert_eq!(x5c.len(), 1);
    assert_eq!(x5c[0], pem_body(RSA_LEAF_PEM));
    assert_eq!(key["x5t"], RSA_LEAF_X5T);
    assert_eq!(key["x5t#S256"], RSA_LEAF_X5T_S256);
}

#[test]
fn test_full_chain_is_leaf_to_root() {
    let key = encode(&rsa_chain(), KeyUsage::Verification, CertificateInclusionMode::FullChain);

    let x5c: Vec<&str> = key["x5c"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        x5c,
        vec![
            pem_body(RSA_LEAF_PEM),
            pem_body(RSA_INTERMEDIATE_PEM),
            pem_body(RSA_ROOT_PEM),
        ]
    );
    assert_eq!(key["x5t"], RSA_LEAF_X5T);
}

#[test]
fn test_full_chain_of_self_signed_has_one_entry() {
    let key = encode(&ec_p256(), KeyUsage::Verification, CertificateInclusionMode::FullChain);
    assert_eq!(key["x5c"].as_array().unwrap().len(), 1);
}

#[test]
fn test_full_chain_with_unparseable_issuer() {
    let cert = Certificate::new(rsa_leaf().der().to_vec(), vec![b"garbage".to_vec()]);
    let result = X509KeyEncoder::new().encode(
        &cert,
        KeyUsage::Verification,
        CertificateInclusionMode::FullChain,
    );

    assert!(matches!(result, Err(EncodeError::ChainRetrieval(msg)) if msg.contains("depth 1")));
}

// ============================================================================
// End to End
// ============================================================================

#[test]
fn test_certificate_to_jwks_chain_pretty() {
    let json = certificate_to_jwks(
        &rsa_chain(),
        &JwksOptions::new().with_include_certificate_chain(true),
    )
    .unwrap();

    json.assert_single_key()
        .assert_pretty()
        .assert_x5c_len(RSA_CHAIN_DEPTH)
        .assert_member("kid", RSA_LEAF_KID)
        .assert_member("x5t", RSA_LEAF_X5T);
}

#[test]
fn test_certificate_to_jwks_default_has_no_certificate_members() {
    let json = certificate_to_jwks(&ec_p384(), &JwksOptions::default()).unwrap();

    json.assert_single_key()
        .assert_no_x5c()
        .assert_no_member("x5t")
        .assert_no_member("x5t#S256");
}

#[test]
fn test_certificate_to_jwks_compact_is_stable() {
    let options = JwksOptions::new()
        .with_include_certificate(true)
        .with_compress(true);

    let first = certificate_to_jwks(&ed25519(), &options).unwrap();
    let second = certificate_to_jwks(&ed25519(), &options).unwrap();

    first.assert_compact().assert_x5c_len(1);
    assert_eq!(first, second);
    assert!(first.starts_with(r#"{"keys":[{"alg":"EdDSA","crv":"Ed25519","kid":"#));
}

#[test]
fn test_certificate_to_jwks_surfaces_encoder_error() {
    let result = certificate_to_jwks(
        &ed25519(),
        &JwksOptions::new().with_key_usage(KeyUsage::Encryption),
    );

    let err = result.unwrap_err();
    assert!(matches!(err, JwksError::Encoding(EncodeError::UnsupportedUsage { .. })));
    assert_eq!(err.to_string(), "Key type OKP cannot be used for encryption");
}
