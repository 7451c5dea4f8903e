//! Dynamically typed attribute values.
//!
//! Products and variants carry free-form attribute dictionaries whose shape
//! is governed (when a template exists) by [`crate::template`]. The values
//! are a small tagged union rather than raw JSON: attributes stop being
//! untyped blobs at the engine boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single attribute value.
///
/// Serialized untagged, so JSON payloads from admin forms decode directly:
/// `true` → `Bool`, `42.5` → `Number`, `"Kırmızı"` → `Text`,
/// `["a", "b"]` → `List`. Variant order matters for untagged deserialization:
/// `Bool` before `Number` before `Text` keeps the decoding unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A checkbox state.
    Bool(bool),
    /// A numeric amount. Unit semantics (a template field's `suffix`) are a
    /// display concern; the raw number passes through unmodified.
    Number(f64),
    /// A free-text or select value.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

impl AttributeValue {
    /// The value as a string slice, if it is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a number, if it is numeric.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// A mapping from template field key to attribute value.
///
/// Unknown keys (no matching field in the governing template) are tolerated
/// and passed through untouched.
pub type Attributes = HashMap<String, AttributeValue>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_decoding() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"Renk": "Kırmızı", "Adet": 250, "Yaldızlı": true, "Boyutlar": ["A4", "A5"]}"#,
        )
        .unwrap();

        assert_eq!(attrs.get("Renk").unwrap().as_text(), Some("Kırmızı"));
        assert_eq!(attrs.get("Adet").unwrap().as_number(), Some(250.0));
        assert_eq!(attrs.get("Yaldızlı").unwrap().as_bool(), Some(true));
        assert_eq!(
            attrs.get("Boyutlar").unwrap(),
            &AttributeValue::List(vec!["A4".to_owned(), "A5".to_owned()])
        );
    }

    #[test]
    fn test_bool_is_not_number() {
        // Untagged order must not swallow booleans into Number.
        let v: AttributeValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, AttributeValue::Bool(true));
    }

    #[test]
    fn test_roundtrip() {
        let v = AttributeValue::from("Mavi");
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"Mavi\"");
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
