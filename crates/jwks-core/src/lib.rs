//! JWK Set assembly from X.509 certificates.
//!
//! Turns a certificate's public key into a JSON Web Key (RFC 7517/7518) and
//! publishes it as a single-key JWK Set document.
//!
//! # Modules
//!
//! - `options` - Key usage, certificate inclusion and format resolution
//! - `certificate` - Certificate input and PEM/DER loading
//! - `jwk` - JWK and JWK Set containers
//! - `encoder` - `KeyEncoder` trait and the X.509 implementation
//! - `builder` - `KeySetBuilder`, the assembly pipeline
//! - `serialize` - Compact and pretty JSON rendering
//! - `error` - Error types
//!
//! # Usage
//!
//! ```rust,ignore
//! use jwks_core::{certificate_to_jwks, Certificate, JwksOptions};
//!
//! let cert = Certificate::from_pem(&std::fs::read("server.pem")?)?;
//! let options = JwksOptions::new().with_include_certificate_chain(true);
//! let jwks = certificate_to_jwks(&cert, &options)?;
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod builder;
pub mod certificate;
pub mod encoder;
pub mod error;
pub mod jwk;
pub mod options;
pub mod serialize;

pub use builder::KeySetBuilder;
pub use certificate::Certificate;
pub use encoder::{KeyEncoder, X509KeyEncoder};
pub use error::{EncodeError, JwksError};
pub use jwk::{Jwk, JwkSet};
pub use options::{CertificateInclusionMode, FormatMode, JwksOptions, KeyUsage, ResolvedOptions};

/// Build a JWK Set document with the X.509 encoder.
///
/// # Errors
///
/// See [`KeySetBuilder::build`].
pub fn certificate_to_jwks(certificate: &Certificate, options: &JwksOptions) -> Result<String, JwksError> {
    KeySetBuilder::new(X509KeyEncoder::new()).build(certificate, options)
}
