//! Parsing and canonical comparison of the active configuration.
//!
//! The file is a JSON object, for example:
//!
//! ```json
//! {
//!   "ConfigVersion": 3,
//!   "Target": "https://api.example.com",
//!   "AccessToken": "bearer eyJhbGciOi...",
//!   "OrganizationFields": { "Name": "my-org" },
//!   "SpaceFields": { "Name": "dev" }
//! }
//! ```
//!
//! `AccessToken` is the only field with a type.  Everything else lives in a
//! JSON map so that fields added by newer hosts still take part in the
//! comparison.
//!
//! # Canonical form
//!
//! [`ConfigData::to_canonical_bytes`] emits compact JSON with `AccessToken`
//! first and every object's keys sorted.  Two files that differ only in
//! whitespace or key order therefore compare equal.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the field that changes on routine use.
pub const VOLATILE_FIELD: &str = "AccessToken";

/// Error type for configuration parsing and serialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The content is not a JSON object of the expected shape.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The canonical form could not be produced.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Structured form of an active configuration or a saved target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// The volatile credential.
    #[serde(
        rename = "AccessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,

    /// Every other top-level field, carried opaquely.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Result of comparing an active configuration against a saved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drift {
    /// Anything other than the volatile field differs.
    pub needs_saving: bool,
    /// The volatile field differs.
    pub needs_update: bool,
}

impl ConfigData {
    /// Parses configuration bytes.
    ///
    /// Empty or whitespace-only content is the empty configuration, which is
    /// how the host treats a freshly created file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the content is not a JSON object or
    /// `AccessToken` is not a string.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes to the canonical byte form used for comparison.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let canonical = ConfigData {
            access_token: self.access_token.clone(),
            fields: sorted_map(&self.fields),
        };
        serde_json::to_vec(&canonical).map_err(ConfigError::Serialize)
    }

    /// Compares `self` (the active configuration) against `saved`.
    ///
    /// The volatile field is compared on its own and then overwritten in a
    /// copy of `saved` before the canonical forms are compared, so a refreshed
    /// token alone never reports `needs_saving`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError::Serialize`].
    pub fn drift_from(&self, saved: &ConfigData) -> Result<Drift, ConfigError> {
        let needs_update = saved.access_token != self.access_token;

        let mut neutralised = saved.clone();
        neutralised.access_token = self.access_token.clone();

        let active_bytes = self.to_canonical_bytes()?;
        let saved_bytes = neutralised.to_canonical_bytes()?;

        Ok(Drift {
            needs_saving: active_bytes != saved_bytes,
            needs_update,
        })
    }
}

/// Rebuilds `map` with keys in sorted order at every nesting level.
///
/// `serde_json::Map` is already sorted unless the `preserve_order` feature is
/// enabled somewhere in the dependency graph; rebuilding keeps the canonical
/// form independent of that.
fn sorted_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), sorted_value(value)))
        .collect()
}

fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sorted_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(sorted_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ConfigData {
        ConfigData::from_slice(json.as_bytes()).expect("valid config")
    }

    #[test]
    fn test_from_slice_extracts_access_token() {
        let cfg = parse(r#"{"AccessToken":"bearer abc","Target":"https://api.example.com"}"#);
        assert_eq!(cfg.access_token.as_deref(), Some("bearer abc"));
        assert_eq!(cfg.fields["Target"], "https://api.example.com");
        assert!(!cfg.fields.contains_key(VOLATILE_FIELD));
    }

    #[test]
    fn test_from_slice_without_token_leaves_it_unset() {
        let cfg = parse(r#"{"Target":"https://api.example.com"}"#);
        assert_eq!(cfg.access_token, None);
    }

    #[test]
    fn test_from_slice_empty_content_is_default() {
        assert_eq!(ConfigData::from_slice(b"").unwrap(), ConfigData::default());
        assert_eq!(
            ConfigData::from_slice(b"  \n").unwrap(),
            ConfigData::default()
        );
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        let result = ConfigData::from_slice(b"[1, 2, 3]");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_slice_rejects_truncated_json() {
        let result = ConfigData::from_slice(br#"{"Target": "https://api"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_slice_rejects_non_string_token() {
        let result = ConfigData::from_slice(br#"{"AccessToken": 42}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_canonical_bytes_put_token_first_and_sort_keys() {
        // Arrange
        let cfg = parse(r#"{"b":{"z":1,"a":2},"AccessToken":"t","a":true}"#);

        // Act
        let bytes = cfg.to_canonical_bytes().unwrap();

        // Assert
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"AccessToken":"t","a":true,"b":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn test_canonical_bytes_sort_objects_inside_arrays() {
        let cfg = parse(r#"{"list":[{"y":1,"x":2}]}"#);
        let bytes = cfg.to_canonical_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"list":[{"x":2,"y":1}]}"#
        );
    }

    #[test]
    fn test_drift_clean_for_identical_content() {
        let active = parse(r#"{"AccessToken":"t1","Target":"a"}"#);
        let saved = parse(r#"{ "Target": "a", "AccessToken": "t1" }"#);

        let drift = active.drift_from(&saved).unwrap();

        assert_eq!(
            drift,
            Drift {
                needs_saving: false,
                needs_update: false
            }
        );
    }

    #[test]
    fn test_drift_token_only_needs_update() {
        // Arrange: everything equal except the volatile field
        let active = parse(r#"{"AccessToken":"new","Target":"a"}"#);
        let saved = parse(r#"{"AccessToken":"old","Target":"a"}"#);

        // Act
        let drift = active.drift_from(&saved).unwrap();

        // Assert
        assert!(drift.needs_update);
        assert!(!drift.needs_saving);
    }

    #[test]
    fn test_drift_added_field_needs_saving() {
        let active = parse(r#"{"AccessToken":"t","Target":"a","SpaceFields":{"Name":"dev"}}"#);
        let saved = parse(r#"{"AccessToken":"t","Target":"a"}"#);

        let drift = active.drift_from(&saved).unwrap();

        assert!(drift.needs_saving);
        assert!(!drift.needs_update);
    }

    #[test]
    fn test_drift_nested_change_needs_saving() {
        let active = parse(r#"{"OrganizationFields":{"Name":"org-b"}}"#);
        let saved = parse(r#"{"OrganizationFields":{"Name":"org-a"}}"#);
        assert!(active.drift_from(&saved).unwrap().needs_saving);
    }

    #[test]
    fn test_drift_token_removed_needs_update_only() {
        let active = parse(r#"{"Target":"a"}"#);
        let saved = parse(r#"{"AccessToken":"t","Target":"a"}"#);

        let drift = active.drift_from(&saved).unwrap();

        assert!(drift.needs_update);
        assert!(!drift.needs_saving);
    }

    #[test]
    fn test_drift_does_not_mutate_saved_copy() {
        let active = parse(r#"{"AccessToken":"new"}"#);
        let saved = parse(r#"{"AccessToken":"old"}"#);

        active.drift_from(&saved).unwrap();

        assert_eq!(saved.access_token.as_deref(), Some("old"));
    }
}
