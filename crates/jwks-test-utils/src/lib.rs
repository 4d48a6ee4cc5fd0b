//! # JWKS Test Utilities
//!
//! Shared test utilities for the JWK Set builder.
//!
//! This crate provides:
//! - Certificate fixtures (RSA chain, P-256, P-384, Ed25519) with known
//!   thumbprints and key parameters
//! - Stub encoders (`StubEncoder`, `FailingEncoder`) for testing the builder
//!   without X.509 parsing
//! - Custom assertions (`JwksAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwks_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let builder = KeySetBuilder::new(StubEncoder::new());
//!     let json = builder.build(&rsa_leaf(), &JwksOptions::default()).unwrap();
//!
//!     json.assert_single_key()
//!         .assert_no_x5c()
//!         .assert_pretty();
//! }
//! ```

pub mod assertions;
pub mod encoders;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::*;
pub use encoders::*;
pub use fixtures::*;
