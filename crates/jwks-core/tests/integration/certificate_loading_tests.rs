//! Certificate loading from PEM and DER fixtures

#![allow(clippy::unwrap_used, clippy::expect_used)]

use base64::{engine::general_purpose::STANDARD, Engine};
use jwks_core::encoder::x5t;
use jwks_core::{Certificate, JwksError};
use jwks_test_utils::*;

fn der_of(pem: &str) -> Vec<u8> {
    STANDARD.decode(pem_body(pem)).unwrap()
}

#[test]
fn test_single_pem_has_no_issuers() {
    let cert = Certificate::from_pem(RSA_LEAF_PEM.as_bytes()).unwrap();

    assert_eq!(cert.der(), der_of(RSA_LEAF_PEM).as_slice());
    assert!(cert.issuers().is_empty());
    assert_eq!(cert.chain_len(), 1);
}

#[test]
fn test_unordered_bundle_is_ordered_leaf_to_root() {
    let cert = Certificate::from_pem(RSA_CHAIN_BUNDLE_PEM.as_bytes()).unwrap();

    assert_eq!(cert.chain_len(), RSA_CHAIN_DEPTH);
    assert_eq!(
        cert.issuers(),
        &[der_of(RSA_INTERMEDIATE_PEM), der_of(RSA_ROOT_PEM)]
    );

    let thumbprints: Vec<String> = cert.chain().map(x5t).collect();
    assert_eq!(thumbprints, vec![RSA_LEAF_X5T, RSA_INTERMEDIATE_X5T, RSA_ROOT_X5T]);
}

#[test]
fn test_unrelated_certificates_are_dropped() {
    let bundle = format!("{}{}{}", RSA_LEAF_PEM, EC_P256_PEM, RSA_INTERMEDIATE_PEM);
    let cert = Certificate::from_pem(bundle.as_bytes()).unwrap();

    // The P-256 certificate is not on the leaf's issuer path; the root is absent
    assert_eq!(cert.issuers(), &[der_of(RSA_INTERMEDIATE_PEM)]);
}

#[test]
fn test_self_signed_leaf_ignores_extra_blocks() {
    let bundle = format!("{}{}", ED25519_PEM, RSA_ROOT_PEM);
    let cert = Certificate::from_pem(bundle.as_bytes()).unwrap();

    assert!(cert.issuers().is_empty());
}

#[test]
fn test_non_certificate_blocks_are_skipped() {
    let bundle = format!(
        "-----BEGIN PUBLIC KEY-----\nMCowBQYDK2VwAyEA\n-----END PUBLIC KEY-----\n{}",
        EC_P384_PEM
    );
    let cert = Certificate::from_pem(bundle.as_bytes()).unwrap();

    assert_eq!(cert.der(), der_of(EC_P384_PEM).as_slice());
}

#[test]
fn test_from_der_fixture() {
    let cert = Certificate::from_der(RSA_LEAF_DER).unwrap();
    assert_eq!(cert, rsa_leaf());
}

#[test]
fn test_from_bytes_detects_format() {
    let from_pem = Certificate::from_bytes(RSA_LEAF_PEM.as_bytes()).unwrap();
    let from_der = Certificate::from_bytes(RSA_LEAF_DER).unwrap();

    assert_eq!(from_pem, from_der);
}

#[test]
fn test_corrupt_block_in_bundle_is_invalid_input() {
    let bundle = format!(
        "{}-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n",
        RSA_LEAF_PEM
    );
    let result = Certificate::from_pem(bundle.as_bytes());

    assert!(matches!(result, Err(JwksError::InvalidInput(_))));
}

#[test]
fn test_fingerprint_is_stable() {
    assert_eq!(rsa_leaf().fingerprint(), rsa_chain().fingerprint());
    assert_ne!(rsa_leaf().fingerprint(), ec_p256().fingerprint());
}
