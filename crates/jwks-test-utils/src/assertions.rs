//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for serialized JWK Set documents.

use serde_json::Value;

/// Parse a JWKS document and return its first key, failing the test otherwise.
pub fn first_key(json: &str) -> Value {
    let doc: Value = serde_json::from_str(json)
        .unwrap_or_else(|e| panic!("Output is not valid JSON: {}\n{}", e, json));
    doc.get("keys")
        .and_then(Value::as_array)
        .and_then(|keys| keys.first())
        .cloned()
        .unwrap_or_else(|| panic!("Output has no keys[0]: {}", json))
}

/// Custom assertions for JWK Set output
///
/// # Example
/// ```rust,ignore
/// json.assert_single_key()
///     .assert_member("kty", "RSA")
///     .assert_x5c_len(3)
///     .assert_compact();
/// ```
pub trait JwksAssertions {
    /// Assert the document is `{"keys":[<one object>]}` and nothing else
    fn assert_single_key(&self) -> &Self;

    /// Assert the key has no certificate members
    fn assert_no_x5c(&self) -> &Self;

    /// Assert the key's `x5c` array has exactly `len` base64 strings
    fn assert_x5c_len(&self, len: usize) -> &Self;

    /// Assert a string member of the key has the given value
    fn assert_member(&self, name: &str, value: &str) -> &Self;

    /// Assert the key has no member with this name
    fn assert_no_member(&self, name: &str) -> &Self;

    /// Assert single-line output with no insignificant whitespace
    fn assert_compact(&self) -> &Self;

    /// Assert multi-line output indented by two spaces
    fn assert_pretty(&self) -> &Self;
}

impl JwksAssertions for str {
    fn assert_single_key(&self) -> &Self {
        let doc: Value = serde_json::from_str(self)
            .unwrap_or_else(|e| panic!("Output is not valid JSON: {}\n{}", e, self));
        let obj = doc.as_object().expect("JWKS must be a JSON object");
        assert_eq!(
            obj.len(),
            1,
            "JWKS must have only the 'keys' member, got {:?}",
            obj.keys().collect::<Vec<_>>()
        );

        let keys = obj
            .get("keys")
            .and_then(Value::as_array)
            .expect("JWKS must have a 'keys' array");
        assert_eq!(keys.len(), 1, "Expected exactly one key, got {}", keys.len());
        assert!(keys[0].is_object(), "keys[0] must be a JSON object");

        self
    }

    fn assert_no_x5c(&self) -> &Self {
        let key = first_key(self);
        assert!(key.get("x5c").is_none(), "Expected no x5c, got {}", key);
        self
    }

    fn assert_x5c_len(&self, len: usize) -> &Self {
        use base64::{engine::general_purpose::STANDARD, Engine};

        let key = first_key(self);
        let x5c = key
            .get("x5c")
            .and_then(Value::as_array)
            .unwrap_or_else(|| panic!("Expected an x5c array, got {}", key));
        assert_eq!(x5c.len(), len, "Unexpected x5c length");

        for entry in x5c {
            let encoded = entry.as_str().expect("x5c entries must be strings");
            assert!(
                STANDARD.decode(encoded).is_ok(),
                "x5c entry is not standard base64: {}",
                encoded
            );
        }

        self
    }

    fn assert_member(&self, name: &str, value: &str) -> &Self {
        let key = first_key(self);
        assert_eq!(
            key.get(name).and_then(Value::as_str),
            Some(value),
            "Unexpected value for member '{}'",
            name
        );
        self
    }

    fn assert_no_member(&self, name: &str) -> &Self {
        let key = first_key(self);
        assert!(key.get(name).is_none(), "Expected no '{}' member in {}", name, key);
        self
    }

    fn assert_compact(&self) -> &Self {
        assert!(!self.contains('\n'), "Compact output must be a single line");
        assert!(
            !self.contains(": ") && !self.contains(", "),
            "Compact output must not contain whitespace after separators"
        );
        self
    }

    fn assert_pretty(&self) -> &Self {
        assert!(self.contains('\n'), "Pretty output must span several lines");
        assert!(
            self.starts_with("{\n  \"keys\": ["),
            "Pretty output must use two-space indentation: {}",
            self
        );
        self
    }
}
