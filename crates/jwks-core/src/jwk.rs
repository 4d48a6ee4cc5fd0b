//! JSON Web Key (RFC 7517) and JWK Set containers.
//!
//! A [`Jwk`] is an open mapping of member name to JSON value. Encoders decide
//! which members exist; the builder only embeds the result in a [`JwkSet`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JWK member names used by the shipped encoder.
pub mod members {
    pub const KTY: &str = "kty";
    pub const KID: &str = "kid";
    pub const USE: &str = "use";
    pub const ALG: &str = "alg";
    pub const N: &str = "n";
    pub const E: &str = "e";
    pub const CRV: &str = "crv";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const X5C: &str = "x5c";
    pub const X5T: &str = "x5t";
    pub const X5T_S256: &str = "x5t#S256";
}

/// A single JSON Web Key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jwk(Map<String, Value>);

impl Jwk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a member, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String value of a member, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Jwk {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// JSON Web Key Set (RFC 7517 section 5).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Wrap exactly one key.
    pub fn single(jwk: Jwk) -> Self {
        Self { keys: vec![jwk] }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
