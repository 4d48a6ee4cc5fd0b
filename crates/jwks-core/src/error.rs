//! Error types for JWK Set assembly.
//!
//! Two layers:
//! - [`EncodeError`] is what a [`crate::encoder::KeyEncoder`] raises.
//! - [`JwksError`] is what the builder returns. Encoder failures pass through
//!   it untouched (transparent `Display` and `source`).

use crate::options::KeyUsage;
use thiserror::Error;

/// Errors raised while turning a certificate into a JWK.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Certificate bytes could not be parsed as X.509.
    #[error("Malformed certificate: {0}")]
    MalformedCertificate(String),

    /// The subject public key uses an algorithm with no JWK mapping.
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The key type cannot serve the requested usage.
    #[error("Key type {key_type} cannot be used for {usage}")]
    UnsupportedUsage { key_type: String, usage: KeyUsage },

    /// An issuer certificate in the chain could not be read.
    #[error("Certificate chain error: {0}")]
    ChainRetrieval(String),
}

/// Errors returned by [`crate::builder::KeySetBuilder`].
#[derive(Debug, Error)]
pub enum JwksError {
    /// Missing/empty certificate or an unrecognised option value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by the key encoder, unchanged.
    #[error(transparent)]
    Encoding(#[from] EncodeError),

    /// The key set could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for JwksError {
    fn from(e: serde_json::Error) -> Self {
        JwksError::Serialization(e.to_string())
    }
}
