//! Certificate fixtures for deterministic tests
//!
//! The PEM files under `fixtures/` were generated once with OpenSSL and are
//! checked in, so every expected value below is fixed:
//!
//! - `rsa_root.pem` -> `rsa_intermediate.pem` -> `rsa_leaf.pem` (RSA-2048)
//! - `rsa_chain_bundle.pem`: leaf, root, intermediate (deliberately unordered)
//! - `ec_p256.pem`, `ec_p384.pem`, `ed25519.pem`: self-signed leaves

use jwks_core::Certificate;
use thiserror::Error;

/// Test fixture error type
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fixture could not be loaded: {0}")]
    Load(String),
}

pub const RSA_LEAF_PEM: &str = include_str!("../fixtures/rsa_leaf.pem");
pub const RSA_INTERMEDIATE_PEM: &str = include_str!("../fixtures/rsa_intermediate.pem");
pub const RSA_ROOT_PEM: &str = include_str!("../fixtures/rsa_root.pem");
pub const RSA_CHAIN_BUNDLE_PEM: &str = include_str!("../fixtures/rsa_chain_bundle.pem");
pub const RSA_LEAF_DER: &[u8] = include_bytes!("../fixtures/rsa_leaf.der");
pub const EC_P256_PEM: &str = include_str!("../fixtures/ec_p256.pem");
pub const EC_P384_PEM: &str = include_str!("../fixtures/ec_p384.pem");
pub const ED25519_PEM: &str = include_str!("../fixtures/ed25519.pem");

/// Depth of the RSA chain: leaf + intermediate + root.
pub const RSA_CHAIN_DEPTH: usize = 3;

// RSA leaf
pub const RSA_LEAF_KID: &str = "v07Hy5oketu6YQeH9Hp7Xg8GjlZ19ojOtW6pXFIPzF0";
pub const RSA_LEAF_X5T: &str = "Y8iE1D0esXWgdJHRZS0gFZPliXU";
pub const RSA_LEAF_X5T_S256: &str = "xxL1ALZ3knetWL5owoepAOSNw14jPg7wa-2fVOT8iEs";
pub const RSA_LEAF_N_PREFIX: &str = "mHKOXAlFUyMPtr_C4sCz";
pub const RSA_INTERMEDIATE_X5T: &str = "UP-3OmjZCL7BjBQUG-WfbR0Elhw";
pub const RSA_ROOT_X5T: &str = "wQ6G_OzheofCZy1_56Q9KX4TZc0";

// EC P-256
pub const EC_P256_KID: &str = "5soCIncYhLvdz73Ow2LDWUI4VOsaicntHr6M_olLUGM";
pub const EC_P256_X: &str = "mNfNV5Mr4CrDXMwR1DPgCA9Wjqj8KA5m4ok-vLiDoxo";
pub const EC_P256_Y: &str = "GrrCfjKmsck49nLtn7bGQMbay1kqjYm8jG72IXL4FNQ";

// EC P-384
pub const EC_P384_KID: &str = "gsLCEGxsUnV1JP1zlga5KGLS2IgO-7iZIer0p-fKv4I";
pub const EC_P384_X: &str = "Rlfz3RtnF8sonjuFqVX_Gy9TT9x4DzX_pQo8iaBCAr7urSBxGbDDDhbL1BXBihQu";
pub const EC_P384_Y: &str = "aivWwm2Chpa5NgLjSDr0BtEcgRyECsc2sDndtumwA4eyCxKBWjWLX97Mu2yqQgAQ";

// Ed25519
pub const ED25519_KID: &str = "j7cJFL9e57sLmXJyDF_4PyjR7io3tVMUncrQrwX1PCo";
pub const ED25519_X: &str = "4KLz93RrGfNqcQ0SNkM5H0URIQp8H7mdIXLYNgbb81A";

/// Load a PEM fixture as a `Certificate`.
///
/// # Errors
///
/// Returns `FixtureError::Load` if the PEM cannot be parsed.
pub fn load_pem(pem: &str) -> Result<Certificate, FixtureError> {
    Certificate::from_pem(pem.as_bytes()).map_err(|e| FixtureError::Load(e.to_string()))
}

/// RSA leaf with no issuers attached.
pub fn rsa_leaf() -> Certificate {
    load_pem(RSA_LEAF_PEM).expect("rsa_leaf.pem fixture")
}

/// RSA leaf with intermediate and root, loaded from the unordered bundle.
pub fn rsa_chain() -> Certificate {
    load_pem(RSA_CHAIN_BUNDLE_PEM).expect("rsa_chain_bundle.pem fixture")
}

pub fn ec_p256() -> Certificate {
    load_pem(EC_P256_PEM).expect("ec_p256.pem fixture")
}

pub fn ec_p384() -> Certificate {
    load_pem(EC_P384_PEM).expect("ec_p384.pem fixture")
}

pub fn ed25519() -> Certificate {
    load_pem(ED25519_PEM).expect("ed25519.pem fixture")
}

/// Base64 body of a single-certificate PEM, which equals its `x5c` entry.
pub fn pem_body(pem: &str) -> String {
    pem.lines().filter(|line| !line.starts_with("-----")).collect()
}
