//! Stub key encoders for builder tests
//!
//! Both encoders count their calls so tests can check that the builder
//! delegates exactly once.

use base64::{engine::general_purpose::STANDARD, Engine};
use jwks_core::{
    Certificate, CertificateInclusionMode, EncodeError, Jwk, KeyEncoder, KeyUsage,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed key id emitted by `StubEncoder`.
pub const STUB_KID: &str = "stub-key-01";

/// Deterministic encoder returning a fixed OKP key.
///
/// `x5c` mirrors the inclusion mode using the certificate's raw bytes, so the
/// chain length can be asserted without parsing X.509.
#[derive(Debug, Default)]
pub struct StubEncoder {
    calls: AtomicUsize,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `encode` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyEncoder for StubEncoder {
    fn encode(
        &self,
        certificate: &Certificate,
        usage: KeyUsage,
        inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut jwk = Jwk::new();
        jwk.insert("kty", "OKP")
            .insert("crv", "Ed25519")
            .insert("x", "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo")
            .insert("kid", STUB_KID)
            .insert("use", usage.jwk_use());

        let x5c: Option<Vec<Value>> = match inclusion {
            CertificateInclusionMode::None => None,
            CertificateInclusionMode::EndEntityOnly => {
                Some(vec![Value::String(STANDARD.encode(certificate.der()))])
            }
            CertificateInclusionMode::FullChain => Some(
                certificate
                    .chain()
                    .map(|der| Value::String(STANDARD.encode(der)))
                    .collect(),
            ),
        };
        if let Some(x5c) = x5c {
            jwk.insert("x5c", Value::Array(x5c));
        }

        Ok(jwk)
    }
}

/// Encoder that always fails with the configured error.
#[derive(Debug)]
pub struct FailingEncoder {
    error: EncodeError,
    calls: AtomicUsize,
}

impl FailingEncoder {
    pub fn new(error: EncodeError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyEncoder for FailingEncoder {
    fn encode(
        &self,
        _certificate: &Certificate,
        _usage: KeyUsage,
        _inclusion: CertificateInclusionMode,
    ) -> Result<Jwk, EncodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
