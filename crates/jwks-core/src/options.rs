//! Build options and their resolution into concrete modes.
//!
//! Callers describe a build with [`JwksOptions`], where every field is
//! optional and carries its own default. [`JwksOptions::resolve`] turns that
//! into a [`ResolvedOptions`] exactly once per build.

use crate::error::JwksError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared purpose of the published key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    /// Signature verification (`use=sig`).
    #[default]
    Verification,
    /// Encryption or key wrapping (`use=enc`).
    Encryption,
}

impl KeyUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Verification => "verification",
            KeyUsage::Encryption => "encryption",
        }
    }

    /// JWK `use` member value for this usage.
    pub fn jwk_use(&self) -> &'static str {
        match self {
            KeyUsage::Verification => "sig",
            KeyUsage::Encryption => "enc",
        }
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyUsage {
    type Err = JwksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verification" | "sig" => Ok(KeyUsage::Verification),
            "encryption" | "enc" => Ok(KeyUsage::Encryption),
            other => Err(JwksError::InvalidInput(format!(
                "Unknown key usage '{}', expected 'verification' or 'encryption'",
                other
            ))),
        }
    }
}

/// How much certificate material accompanies the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificateInclusionMode {
    /// No `x5c` or thumbprint members.
    #[default]
    None,
    /// `x5c` holds the end-entity certificate only.
    EndEntityOnly,
    /// `x5c` holds the end-entity certificate followed by its issuers.
    FullChain,
}

impl CertificateInclusionMode {
    /// Resolve the two inclusion switches. The chain flag wins when both are set.
    pub fn from_flags(include_certificate: bool, include_certificate_chain: bool) -> Self {
        if include_certificate_chain {
            if include_certificate {
                tracing::debug!(
                    target: "jwks.options",
                    "Both inclusion flags set, full chain takes precedence"
                );
            }
            CertificateInclusionMode::FullChain
        } else if include_certificate {
            CertificateInclusionMode::EndEntityOnly
        } else {
            CertificateInclusionMode::None
        }
    }

    pub fn includes_certificate(&self) -> bool {
        !matches!(self, CertificateInclusionMode::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateInclusionMode::None => "none",
            CertificateInclusionMode::EndEntityOnly => "end-entity-only",
            CertificateInclusionMode::FullChain => "full-chain",
        }
    }
}

impl fmt::Display for CertificateInclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whitespace policy for the emitted JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatMode {
    /// No insignificant whitespace.
    Compact,
    /// Two-space indentation, one member per line.
    #[default]
    Pretty,
}

impl FormatMode {
    pub fn from_compress(compress: bool) -> Self {
        if compress {
            FormatMode::Compact
        } else {
            FormatMode::Pretty
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatMode::Compact => "compact",
            FormatMode::Pretty => "pretty",
        }
    }
}

/// Caller-facing options for one key-set build.
///
/// A field left as `None` was not supplied and takes its default:
/// verification usage, no certificate material, pretty output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JwksOptions {
    pub key_usage: Option<KeyUsage>,
    pub include_certificate: Option<bool>,
    pub include_certificate_chain: Option<bool>,
    pub compress: Option<bool>,
}

impl JwksOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key_usage(mut self, usage: KeyUsage) -> Self {
        self.key_usage = Some(usage);
        self
    }

    #[must_use]
    pub fn with_include_certificate(mut self, include: bool) -> Self {
        self.include_certificate = Some(include);
        self
    }

    #[must_use]
    pub fn with_include_certificate_chain(mut self, include: bool) -> Self {
        self.include_certificate_chain = Some(include);
        self
    }

    #[must_use]
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    /// Fill every unset field of `self` from `defaults`.
    ///
    /// Used by front ends that layer explicit flags over configured defaults.
    #[must_use]
    pub fn or(self, defaults: &JwksOptions) -> Self {
        Self {
            key_usage: self.key_usage.or(defaults.key_usage),
            include_certificate: self.include_certificate.or(defaults.include_certificate),
            include_certificate_chain: self
                .include_certificate_chain
                .or(defaults.include_certificate_chain),
            compress: self.compress.or(defaults.compress),
        }
    }

    /// Apply defaults and precedence rules.
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            usage: self.key_usage.unwrap_or_default(),
            inclusion: CertificateInclusionMode::from_flags(
                self.include_certificate.unwrap_or(false),
                self.include_certificate_chain.unwrap_or(false),
            ),
            format: FormatMode::from_compress(self.compress.unwrap_or(false)),
        }
    }
}

/// Options after defaults and precedence have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub usage: KeyUsage,
    pub inclusion: CertificateInclusionMode,
    pub format: FormatMode,
}
