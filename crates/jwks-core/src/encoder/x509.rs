//! X.509 key encoder.
//!
//! Produces `kty`, key parameters, `kid` (RFC 7638 thumbprint), `use` and
//! `alg`, plus `x5c`/`x5t`/`x5t#S256` when certificate material is requested.

use crate::certificate::Certificate;
use crate::encoder::key_params::PublicKeyParams;
use crate::encoder::thumbprint::{x5t, x5t_s256};
use crate::encoder::KeyEncoder;
use crate::error::EncodeError;
use crate::jwk::{members, Jwk};
use crate::options::{CertificateInclusionMode, KeyUsage};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::instrument;
use x509_parser::prelude::*;

/// Encodes the end-entity public key of an X.509 certificate.
///
/// Stateless; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509KeyEncoder;

impl X509KeyEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl KeyEncoder for X509KeyEncoder {
    #[instrument(
        name = "jwks.encoder.x509",
        skip_all,
        fields(
            fingerprint = %certificate.fingerprint(),
            usage = %usage,
            inclusion = %inclusion,
        )
    )]
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        let (_, cert) = X509Certificate::from_der(certificate.der()).map_err(|e| {
            tracing::debug!(target: "jwks.encoder", error = %e, "Failed to parse end-entity certificate");
            EncodeError::MalformedCertificate(e.to_string())
        })?;

        warn_on_key_usage_mismatch(&cert, usage);

        let params = PublicKeyParams::from_spki(cert.public_key())?;
        let alg = params.algorithm(usage)?;

        let mut jwk = params.to_jwk();
        jwk.insert(members::KID, params.thumbprint())
            .insert(members::USE, usage.jwk_use())
            .insert(members::ALG, alg);

        let x5c = match inclusion {
            CertificateInclusionMode::None => None,
            CertificateInclusionMode::EndEntityOnly => Some(vec![STANDARD.encode(certificate.der())]),
            CertificateInclusionMode::FullChain => Some(encode_chain(certificate)?),
        };

        if let Some(x5c) = x5c {
            tracing::debug!(
                target: "jwks.encoder",
                chain_len = x5c.len(),
                "Embedding certificate material"
            );
            jwk.insert(
                members::X5C,
                Value::Array(x5c.into_iter().map(Value::String).collect()),
            )
            .insert(members::X5T, x5t(certificate.der()))
            .insert(members::X5T_S256, x5t_s256(certificate.der()));
        }

        Ok(jwk)
    }
}

/// Standard base64 (RFC 7517 section 4.7) of each certificate, leaf first.
fn encode_chain(certificate: &Certificate) -> Result<Vec<String>, EncodeError> {
    let mut x5c = Vec::with_capacity(certificate.chain_len());
    x5c.push(STANDARD.encode(certificate.der()));

    for (depth, der) in certificate.issuers().iter().enumerate() {
        X509Certificate::from_der(der).map_err(|e| {
            EncodeError::ChainRetrieval(format!("Issuer at depth {} is not X.509: {}", depth + 1, e))
        })?;
        x5c.push(STANDARD.encode(der));
    }

    Ok(x5c)
}

/// Log when the certificate's keyUsage extension does not allow `usage`.
///
/// Certificate policy is not enforced here; the key is still encoded.
fn warn_on_key_usage_mismatch(cert: &X509Certificate<'_>, usage: KeyUsage) {
    let ext = match cert.key_usage() {
        Ok(Some(ext)) => ext,
        Ok(None) => return,
        Err(e) => {
            tracing::debug!(target: "jwks.encoder", error = %e, "Unreadable keyUsage extension");
            return;
        }
    };

    let permitted = match usage {
        KeyUsage::Verification => ext.value.digital_signature() || ext.value.non_repudiation(),
        KeyUsage::Encryption => ext.value.key_encipherment() || ext.value.key_agreement(),
    };

    if !permitted {
        tracing::warn!(
            target: "jwks.encoder",
            usage = %usage,
            key_usage_flags = ext.value.flags,
            "Certificate keyUsage extension does not permit the requested usage"
        );
    }
}
