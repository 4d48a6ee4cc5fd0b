//! Thumbprints: RFC 7638 key thumbprints and X.509 `x5t` values.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ring::digest::{digest, SHA1_FOR_LEGACY_USE_ONLY, SHA256};
use serde_json::{Map, Value};

/// SHA-256 JWK thumbprint (RFC 7638), base64url without padding.
///
/// `required` must hold only the key type's required members. `Map` keeps
/// keys sorted, so compact rendering is already the canonical form.
pub fn jwk_thumbprint(required: &Map<String, Value>) -> String {
    let canonical = Value::Object(required.clone()).to_string();
    URL_SAFE_NO_PAD.encode(digest(&SHA256, canonical.as_bytes()))
}

/// `x5t`: base64url SHA-1 of the certificate DER.
pub fn x5t(der: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(digest(&SHA1_FOR_LEGACY_USE_ONLY, der))
}

/// `x5t#S256`: base64url SHA-256 of the certificate DER.
pub fn x5t_s256(der: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(digest(&SHA256, der))
}
