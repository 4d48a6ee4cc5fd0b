//! Key encoders: certificate to JWK.
//!
//! [`KeyEncoder`] is the seam between the key-set builder and whatever
//! extracts key parameters from a certificate. [`X509KeyEncoder`] is the
//! implementation backed by `x509-parser`.

mod key_params;
mod thumbprint;
mod x509;

pub use key_params::{Curve, PublicKeyParams};
pub use thumbprint::{jwk_thumbprint, x5t, x5t_s256};
pub use x509::X509KeyEncoder;

use crate::certificate::Certificate;
use crate::error::EncodeError;
use crate::jwk::Jwk;
use crate::options::{CertificateInclusionMode, KeyUsage};
use std::sync::Arc;

/// Produces one JWK for a certificate.
///
/// Implementations must be safe to call from several threads at once; the
/// builder holds no lock around them.
pub trait KeyEncoder: Send + Sync {
    /// Encode the certificate's public key.
    ///
    /// Certificate members (`x5c`, `x5t`, `x5t#S256`) must be present exactly
    /// when `inclusion` is not [`CertificateInclusionMode::None`].
    ///
    /// # Errors
    ///
    /// Returns an `EncodeError` describing why no JWK could be produced.
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError>;
}

impl<E: KeyEncoder + ?Sized> KeyEncoder for &E {
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        (**self).encode(certificate, usage, inclusion)
    }
}

impl<E: KeyEncoder + ?Sized> KeyEncoder for Arc<E> {
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        (**self).encode(certificate, usage, inclusion)
    }
}

impl<E: KeyEncoder + ?Sized> KeyEncoder for Box<E> {
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        (**self).encode(certificate, usage, inclusion)
    }
}
