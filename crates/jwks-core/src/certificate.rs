//! Certificate input: an end-entity certificate plus its issuers.
//!
//! The builder only needs DER bytes. Loading from PEM bundles orders the
//! issuers by walking issuer names from the leaf towards the root.
//!
//! # Security
//!
//! - Inputs above [`MAX_INPUT_SIZE`] are rejected before parsing
//! - Debug output shows a short fingerprint, never certificate bytes

use crate::error::JwksError;
use ring::digest::{digest, SHA256};
use std::fmt;
use x509_parser::pem::Pem;
use x509_parser::prelude::*;

/// Largest PEM or DER input accepted by the loaders (1 MiB).
pub const MAX_INPUT_SIZE: usize = 1024 * 1024;

const PEM_CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// A certificate and the issuers that lead to its root.
///
/// `issuers` is ordered closest issuer first, root last. The type is
/// immutable once constructed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    issuers: Vec<Vec<u8>>,
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("fingerprint", &self.fingerprint())
            .field("chain_len", &self.chain_len())
            .finish()
    }
}

impl Certificate {
    /// Wrap already-loaded DER bytes without parsing them.
    pub fn new(der: Vec<u8>, issuers: Vec<Vec<u8>>) -> Self {
        Self { der, issuers }
    }

    /// Load a single DER-encoded certificate.
    ///
    /// # Errors
    ///
    /// Returns `JwksError::InvalidInput` if the bytes are empty, too large, or
    /// not an X.509 certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, JwksError> {
        check_size(der)?;
        parse_names(der)?;
        Ok(Self::new(der.to_vec(), Vec::new()))
    }

    /// Load a PEM bundle. The first `CERTIFICATE` block is the end-entity
    /// certificate; later blocks are candidate issuers.
    ///
    /// Blocks with other labels (keys, CSRs) are skipped.
    ///
    /// # Errors
    ///
    /// Returns `JwksError::InvalidInput` if the input is too large, contains
    /// invalid PEM, contains no certificate, or a block is not X.509.
    pub fn from_pem(pem: &[u8]) -> Result<Self, JwksError> {
        check_size(pem)?;

        let mut blocks = Vec::new();
        for block in Pem::iter_from_buffer(pem) {
            let block = block
                .map_err(|e| JwksError::InvalidInput(format!("Invalid PEM data: {}", e)))?;
            if block.label == PEM_CERTIFICATE_LABEL {
                blocks.push(block.contents);
            } else {
                tracing::debug!(
                    target: "jwks.certificate",
                    label = %block.label,
                    "Skipping non-certificate PEM block"
                );
            }
        }

        let mut blocks = blocks.into_iter();
        let leaf = blocks
            .next()
            .ok_or_else(|| JwksError::InvalidInput("No certificate found in PEM input".to_string()))?;
        let issuers = order_chain(&leaf, blocks.collect())?;

        Ok(Self::new(leaf, issuers))
    }

    /// Load PEM or DER, detected by the presence of a PEM armor line.
    ///
    /// # Errors
    ///
    /// See [`Certificate::from_pem`] and [`Certificate::from_der`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JwksError> {
        if is_pem(bytes) {
            Self::from_pem(bytes)
        } else {
            Self::from_der(bytes)
        }
    }

    /// DER bytes of the end-entity certificate.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Issuer DERs, closest issuer first.
    pub fn issuers(&self) -> &[Vec<u8>] {
        &self.issuers
    }

    /// End-entity certificate followed by its issuers.
    pub fn chain(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(self.der.as_slice()).chain(self.issuers.iter().map(Vec::as_slice))
    }

    /// Number of certificates from the leaf to the last known issuer.
    pub fn chain_len(&self) -> usize {
        1 + self.issuers.len()
    }

    /// True when no end-entity certificate bytes are present.
    pub fn is_empty(&self) -> bool {
        self.der.is_empty()
    }

    /// Short SHA-256 prefix of the end-entity DER for log correlation.
    pub fn fingerprint(&self) -> String {
        if self.der.is_empty() {
            return "empty".to_string();
        }
        let hash = digest(&SHA256, &self.der);
        hex::encode(hash.as_ref().get(..4).unwrap_or_default())
    }
}

fn check_size(input: &[u8]) -> Result<(), JwksError> {
    if input.is_empty() {
        return Err(JwksError::InvalidInput("Certificate input is empty".to_string()));
    }
    if input.len() > MAX_INPUT_SIZE {
        return Err(JwksError::InvalidInput(format!(
            "Certificate input too large: {} bytes (max {})",
            input.len(),
            MAX_INPUT_SIZE
        )));
    }
    Ok(())
}

fn is_pem(bytes: &[u8]) -> bool {
    bytes.windows(11).any(|w| w == b"-----BEGIN ")
}

/// Raw subject and issuer names of a certificate.
struct Names {
    subject: Vec<u8>,
    issuer: Vec<u8>,
}

impl Names {
    fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }
}

fn parse_names(der: &[u8]) -> Result<Names, JwksError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| JwksError::InvalidInput(format!("Failed to parse X.509 certificate: {}", e)))?;
    Ok(Names {
        subject: cert.subject().as_raw().to_vec(),
        issuer: cert.issuer().as_raw().to_vec(),
    })
}

/// Order candidate issuers from the leaf's issuer up to a self-issued root.
///
/// Candidates not on that path are dropped.
fn order_chain(leaf: &[u8], candidates: Vec<Vec<u8>>) -> Result<Vec<Vec<u8>>, JwksError> {
    let leaf_names = parse_names(leaf)?;

    let mut remaining = Vec::with_capacity(candidates.len());
    for der in candidates {
        let names = parse_names(&der)?;
        remaining.push((names, der));
    }

    let mut ordered = Vec::new();
    let mut reached_root = leaf_names.is_self_issued();
    let mut next_issuer = leaf_names.issuer;

    while !reached_root {
        let Some(pos) = remaining
            .iter()
            .position(|(names, _)| names.subject == next_issuer)
        else {
            break;
        };
        let (names, der) = remaining.swap_remove(pos);
        reached_root = names.is_self_issued();
        next_issuer = names.issuer;
        ordered.push(der);
    }

    if !remaining.is_empty() {
        tracing::debug!(
            target: "jwks.certificate",
            dropped = remaining.len(),
            "Dropped certificates that are not on the issuer path"
        );
    }

    Ok(ordered)
}
