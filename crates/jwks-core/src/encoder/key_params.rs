//! Public key parameters in JWK form (RFC 7518 section 6, RFC 8037).

use crate::encoder::thumbprint::jwk_thumbprint;
use crate::error::EncodeError;
use crate::jwk::{members, Jwk};
use crate::options::KeyUsage;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};
use x509_parser::public_key::PublicKey;
use x509_parser::x509::SubjectPublicKeyInfo;

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";
const OID_ED448: &str = "1.3.101.113";

const OID_CURVE_P256: &str = "1.2.840.10045.3.1.7";
const OID_CURVE_P384: &str = "1.3.132.0.34";
const OID_CURVE_P521: &str = "1.3.132.0.35";

/// Named curves with a JWK `crv` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    P256,
    P384,
    P521,
    Ed25519,
    Ed448,
}

impl Curve {
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Ed25519 => "Ed25519",
            Curve::Ed448 => "Ed448",
        }
    }

    /// Byte length of one coordinate (EC) or of the public key (OKP).
    fn key_size(&self) -> usize {
        match self {
            Curve::P256 | Curve::Ed25519 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
            Curve::Ed448 => 57,
        }
    }

    fn from_ec_oid(oid: &str) -> Option<Self> {
        match oid {
            OID_CURVE_P256 => Some(Curve::P256),
            OID_CURVE_P384 => Some(Curve::P384),
            OID_CURVE_P521 => Some(Curve::P521),
            _ => None,
        }
    }
}

/// Key parameters, already base64url-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyParams {
    Rsa { n: String, e: String },
    Ec { crv: Curve, x: String, y: String },
    Okp { crv: Curve, x: String },
}

impl PublicKeyParams {
    /// Extract parameters from a certificate's SubjectPublicKeyInfo.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKeyType` for algorithms or curves with no JWK mapping,
    ///   and for compressed EC points
    /// - `MalformedCertificate` if the key bytes do not match the algorithm
    pub fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> Result<Self, EncodeError> {
        let algorithm = spki.algorithm.algorithm.to_id_string();

        match algorithm.as_str() {
            OID_RSA_ENCRYPTION => match spki.parsed() {
                Ok(PublicKey::RSA(rsa)) => Ok(PublicKeyParams::Rsa {
                    n: encode_unsigned(rsa.modulus),
                    e: encode_unsigned(rsa.exponent),
                }),
                Ok(_) => Err(EncodeError::MalformedCertificate(
                    "RSA algorithm with non-RSA key data".to_string(),
                )),
                Err(e) => Err(EncodeError::MalformedCertificate(format!(
                    "Invalid RSA public key: {}",
                    e
                ))),
            },
            OID_EC_PUBLIC_KEY => {
                let curve_oid = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .and_then(|params| params.as_oid().ok())
                    .map(|oid| oid.to_id_string())
                    .ok_or_else(|| {
                        EncodeError::MalformedCertificate(
                            "EC public key without named curve".to_string(),
                        )
                    })?;
                let crv = Curve::from_ec_oid(&curve_oid).ok_or_else(|| {
                    EncodeError::UnsupportedKeyType(format!("EC curve {}", curve_oid))
                })?;
                let (x, y) = split_uncompressed_point(&spki.subject_public_key.data, crv)?;
                Ok(PublicKeyParams::Ec {
                    crv,
                    x: URL_SAFE_NO_PAD.encode(x),
                    y: URL_SAFE_NO_PAD.encode(y),
                })
            }
            OID_ED25519 => okp(Curve::Ed25519, &spki.subject_public_key.data),
            OID_ED448 => okp(Curve::Ed448, &spki.subject_public_key.data),
            other => Err(EncodeError::UnsupportedKeyType(format!(
                "public key algorithm {}",
                other
            ))),
        }
    }

    /// JWK `kty` member.
    pub fn kty(&self) -> &'static str {
        match self {
            PublicKeyParams::Rsa { .. } => "RSA",
            PublicKeyParams::Ec { .. } => "EC",
            PublicKeyParams::Okp { .. } => "OKP",
        }
    }

    /// JWK `alg` member for the requested usage.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedUsage` for Edwards-curve keys used for encryption.
    pub fn algorithm(&self, usage: KeyUsage) -> Result<&'static str, EncodeError> {
        match (self, usage) {
            (PublicKeyParams::Rsa { .. }, KeyUsage::Verification) => Ok("RS256"),
            (PublicKeyParams::Rsa { .. }, KeyUsage::Encryption) => Ok("RSA-OAEP-256"),
            (PublicKeyParams::Ec { crv, .. }, KeyUsage::Verification) => match crv {
                Curve::P256 => Ok("ES256"),
                Curve::P384 => Ok("ES384"),
                _ => Ok("ES512"),
            },
            (PublicKeyParams::Ec { .. }, KeyUsage::Encryption) => Ok("ECDH-ES"),
            (PublicKeyParams::Okp { .. }, KeyUsage::Verification) => Ok("EdDSA"),
            (PublicKeyParams::Okp { .. }, KeyUsage::Encryption) => {
                Err(EncodeError::UnsupportedUsage {
                    key_type: self.kty().to_string(),
                    usage,
                })
            }
        }
    }

    /// Required members only, in lexicographic order (RFC 7638 section 3.2).
    pub fn required_members(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            PublicKeyParams::Rsa { n, e } => {
                map.insert(members::E.to_string(), e.clone().into());
                map.insert(members::KTY.to_string(), self.kty().into());
                map.insert(members::N.to_string(), n.clone().into());
            }
            PublicKeyParams::Ec { crv, x, y } => {
                map.insert(members::CRV.to_string(), crv.as_str().into());
                map.insert(members::KTY.to_string(), self.kty().into());
                map.insert(members::X.to_string(), x.clone().into());
                map.insert(members::Y.to_string(), y.clone().into());
            }
            PublicKeyParams::Okp { crv, x } => {
                map.insert(members::CRV.to_string(), crv.as_str().into());
                map.insert(members::KTY.to_string(), self.kty().into());
                map.insert(members::X.to_string(), x.clone().into());
            }
        }
        map
    }

    /// RFC 7638 thumbprint, used as `kid`.
    pub fn thumbprint(&self) -> String {
        jwk_thumbprint(&self.required_members())
    }

    /// A JWK holding the required members.
    pub fn to_jwk(&self) -> Jwk {
        Jwk::from(self.required_members())
    }
}

fn okp(crv: Curve, key: &[u8]) -> Result<PublicKeyParams, EncodeError> {
    if key.len() != crv.key_size() {
        return Err(EncodeError::MalformedCertificate(format!(
            "{} public key must be {} bytes, got {}",
            crv.as_str(),
            crv.key_size(),
            key.len()
        )));
    }
    Ok(PublicKeyParams::Okp {
        crv,
        x: URL_SAFE_NO_PAD.encode(key),
    })
}

/// Split `0x04 || X || Y` into fixed-width coordinates.
fn split_uncompressed_point(point: &[u8], crv: Curve) -> Result<(&[u8], &[u8]), EncodeError> {
    let size = crv.key_size();
    match point.first() {
        Some(0x04) if point.len() == 1 + 2 * size => {
            let x = point.get(1..=size);
            let y = point.get(1 + size..);
            x.zip(y).ok_or_else(|| {
                EncodeError::MalformedCertificate("EC point out of range".to_string())
            })
        }
        Some(0x02 | 0x03) => Err(EncodeError::UnsupportedKeyType(format!(
            "compressed {} point",
            crv.as_str()
        ))),
        _ => Err(EncodeError::MalformedCertificate(format!(
            "Invalid {} point encoding ({} bytes)",
            crv.as_str(),
            point.len()
        ))),
    }
}

/// Base64url of a big-endian unsigned integer without leading zero bytes.
fn encode_unsigned(bytes: &[u8]) -> String {
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    URL_SAFE_NO_PAD.encode(bytes.get(start..).unwrap_or(bytes))
}
