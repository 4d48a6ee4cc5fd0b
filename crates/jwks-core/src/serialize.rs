//! JSON rendering of key sets.

use crate::error::JwksError;
use crate::jwk::JwkSet;
use crate::options::FormatMode;

/// Render a key set as JSON text.
///
/// Output depends only on the set and the mode: member order follows the
/// key maps, pretty output uses a two-space indent, and no trailing newline
/// is appended.
///
/// # Errors
///
/// Returns `JwksError::Serialization` if serde_json cannot render a value.
/// Keys hold only `serde_json::Value` members, so sets built by this crate
/// always render. No partial text is returned.
pub fn to_json(set: &JwkSet, format: FormatMode) -> Result<String, JwksError> {
    let json = match format {
        FormatMode::Compact => serde_json::to_string(set),
        FormatMode::Pretty => serde_json::to_string_pretty(set),
    }
    .map_err(|e| {
        tracing::debug!(target: "jwks.serialize", error = %e, "Failed to serialize key set");
        e
    })?;

    Ok(json)
}
