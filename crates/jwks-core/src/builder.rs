//! Key-set builder: one certificate in, one JWK Set document out.
//!
//! A build is a single pass:
//! 1. resolve [`JwksOptions`] into usage, inclusion mode and format
//! 2. call the [`KeyEncoder`] once
//! 3. wrap the key in a [`JwkSet`]
//! 4. serialize
//!
//! Nothing is retried and nothing is returned on failure.

use crate::certificate::Certificate;
use crate::encoder::KeyEncoder;
use crate::error::JwksError;
use crate::jwk::JwkSet;
use crate::options::{JwksOptions, ResolvedOptions};
use crate::serialize;
use tracing::instrument;

/// Builds JWK Set documents from certificates.
///
/// Holds no mutable state; share it across threads freely when the encoder
/// allows it.
#[derive(Debug, Clone, Default)]
pub struct KeySetBuilder<E> {
    encoder: E,
}

impl<E: KeyEncoder> KeySetBuilder<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Build and serialize a single-key JWK Set.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the certificate is empty (the encoder is not called)
    /// - `Encoding` with the encoder's error, unchanged
    /// - `Serialization` if the set cannot be rendered
    #[instrument(
        name = "jwks.builder.build",
        skip_all,
        fields(fingerprint = %certificate.fingerprint(), status)
    )]
    pub fn build(&self, certificate: &Certificate, options: &JwksOptions) -> Result<String, JwksError> {
        let resolved = options.resolve();
        let result = self
            .build_resolved(certificate, &resolved)
            .and_then(|set| serialize::to_json(&set, resolved.format));

        let status = if result.is_ok() { "success" } else { "error" };
        tracing::Span::current().record("status", status);

        result
    }

    /// Build the key set without serializing it.
    ///
    /// # Errors
    ///
    /// Same as [`KeySetBuilder::build`], minus serialization.
    pub fn build_set(&self, certificate: &Certificate, options: &JwksOptions) -> Result<JwkSet, JwksError> {
        self.build_resolved(certificate, &options.resolve())
    }

    fn build_resolved(
        &self,
        certificate: &Certificate,
        resolved: &ResolvedOptions,
    ) -> Result<JwkSet, JwksError> {
        if certificate.is_empty() {
            tracing::debug!(target: "jwks.builder", "Rejected empty certificate");
            return Err(JwksError::InvalidInput(
                "A certificate is required".to_string(),
            ));
        }

        tracing::debug!(
            target: "jwks.builder",
            usage = %resolved.usage,
            inclusion = %resolved.inclusion,
            format = resolved.format.as_str(),
            "Resolved key set options"
        );

        let jwk = self
            .encoder
            .encode(certificate, resolved.usage, resolved.inclusion)
            .map_err(|e| {
                tracing::debug!(target: "jwks.builder", error = %e, "Key encoder failed");
                JwksError::Encoding(e)
            })?;

        Ok(JwkSet::single(jwk))
    }
}
