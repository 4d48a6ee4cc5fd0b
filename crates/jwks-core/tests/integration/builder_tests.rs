//! Key-set builder properties
//!
//! These tests drive `KeySetBuilder` with the stub encoders from
//! jwks-test-utils, so they exercise assembly and serialization only.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use jwks_core::{Certificate, EncodeError, JwksError, JwksOptions, KeySetBuilder, KeyUsage};
use jwks_test_utils::*;
use serde_json::Value;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn stub_builder() -> KeySetBuilder<StubEncoder> {
    KeySetBuilder::new(StubEncoder::new())
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// Defaults and Mode Resolution
// ============================================================================

#[test]
fn test_default_build_has_one_key_without_x5c() {
    let json = stub_builder()
        .build(&rsa_leaf(), &JwksOptions::default())
        .unwrap();

    json.assert_single_key()
        .assert_no_x5c()
        .assert_member("kid", STUB_KID)
        .assert_member("use", "sig")
        .assert_pretty();
}

#[test]
fn test_both_flags_equal_chain_only() {
    let builder = stub_builder();
    let cert = rsa_chain();

    let both = builder
        .build(
            &cert,
            &JwksOptions::new()
                .with_include_certificate(true)
                .with_include_certificate_chain(true),
        )
        .unwrap();
    let chain_only = builder
        .build(&cert, &JwksOptions::new().with_include_certificate_chain(true))
        .unwrap();

    assert_eq!(both, chain_only);
}

#[test]
fn test_flags_false_means_no_x5c() {
    let json = stub_builder()
        .build(
            &rsa_chain(),
            &JwksOptions::new()
                .with_include_certificate(false)
                .with_include_certificate_chain(false),
        )
        .unwrap();

    json.assert_single_key().assert_no_x5c();
}

#[test]
fn test_omitted_usage_equals_verification() {
    let builder = stub_builder();
    let cert = rsa_leaf();

    let omitted = builder.build(&cert, &JwksOptions::default()).unwrap();
    let explicit = builder
        .build(&cert, &JwksOptions::new().with_key_usage(KeyUsage::Verification))
        .unwrap();

    assert_eq!(omitted, explicit);
}

#[test]
fn test_encryption_usage_reaches_encoder() {
    let json = stub_builder()
        .build(&rsa_leaf(), &JwksOptions::new().with_key_usage(KeyUsage::Encryption))
        .unwrap();

    json.assert_member("use", "enc");
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_compact_and_pretty_are_structurally_equal() {
    let builder = stub_builder();
    let cert = rsa_chain();
    let base = JwksOptions::new().with_include_certificate_chain(true);

    let compact = builder.build(&cert, &base.clone().with_compress(true)).unwrap();
    let pretty = builder.build(&cert, &base.with_compress(false)).unwrap();

    compact.assert_compact();
    pretty.assert_pretty();
    assert_ne!(compact, pretty);
    assert_eq!(parse(&compact), parse(&pretty));
}

#[test]
fn test_build_is_idempotent() {
    let builder = stub_builder();
    let cert = rsa_chain();
    let options = JwksOptions::new().with_include_certificate(true);

    let first = builder.build(&cert, &options).unwrap();
    let second = builder.build(&cert, &options).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_include_certificate_compressed_is_single_line_with_one_x5c() {
    let json = stub_builder()
        .build(
            &rsa_chain(),
            &JwksOptions::new()
                .with_include_certificate(true)
                .with_compress(true),
        )
        .unwrap();

    json.assert_single_key().assert_compact().assert_x5c_len(1);
}

#[test]
fn test_include_chain_pretty_has_full_chain() {
    let json = stub_builder()
        .build(
            &rsa_chain(),
            &JwksOptions::new()
                .with_include_certificate_chain(true)
                .with_compress(false),
        )
        .unwrap();

    json.assert_single_key()
        .assert_pretty()
        .assert_x5c_len(RSA_CHAIN_DEPTH);
}

// ============================================================================
// Delegation and Errors
// ============================================================================

#[test]
fn test_encoder_called_exactly_once_per_build() {
    let builder = stub_builder();
    let cert = rsa_leaf();

    builder.build(&cert, &JwksOptions::default()).unwrap();
    assert_eq!(builder.encoder().calls(), 1);

    builder
        .build(&cert, &JwksOptions::new().with_include_certificate_chain(true))
        .unwrap();
    assert_eq!(builder.encoder().calls(), 2);
}

#[test]
fn test_empty_certificate_is_invalid_input() {
    let builder = stub_builder();
    let result = builder.build(&Certificate::default(), &JwksOptions::default());

    assert!(matches!(result, Err(JwksError::InvalidInput(_))));
    assert_eq!(builder.encoder().calls(), 0);
}

#[test]
fn test_encoder_error_propagates_verbatim() {
    let error = EncodeError::ChainRetrieval("issuer store unavailable".to_string());
    let builder = KeySetBuilder::new(FailingEncoder::new(error.clone()));

    let result = builder.build(&rsa_leaf(), &JwksOptions::default());

    match result {
        Err(JwksError::Encoding(inner)) => {
            assert_eq!(inner, error);
            assert_eq!(
                JwksError::Encoding(inner).to_string(),
                "Certificate chain error: issuer store unavailable"
            );
        }
        other => panic!("Expected encoding error, got {:?}", other),
    }
    assert_eq!(builder.encoder().calls(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_parallel_builds_share_one_builder() {
    let builder = Arc::new(stub_builder());
    let cert = Arc::new(rsa_chain());
    let options = JwksOptions::new()
        .with_include_certificate_chain(true)
        .with_compress(true);
    let expected = builder.build(&cert, &options).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| builder.build(&cert, &options).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    assert_eq!(builder.encoder().calls(), 9);
}
