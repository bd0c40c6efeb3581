//! Ordered telemetry attributes.

use opentelemetry::{Array, KeyValue, StringValue, Value};
use serde::Serialize;
use std::fmt;

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Plain string.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Set of strings; order carries no meaning.
    StringSet(Vec<String>),
}

impl AttributeValue {
    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string-set payload, if any.
    #[must_use]
    pub fn as_set(&self) -> Option<&[String]> {
        match self {
            Self::StringSet(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::StringSet(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for AttributeValue {
    /// Saturates at `i64::MAX`.
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringSet(value)
    }
}

impl From<AttributeValue> for Value {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::String(s) => Self::from(s),
            AttributeValue::Int(v) => Self::I64(v),
            AttributeValue::Bool(v) => Self::Bool(v),
            AttributeValue::StringSet(v) => {
                Self::Array(Array::String(v.into_iter().map(StringValue::from).collect()))
            },
        }
    }
}

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: AttributeValue,
}

/// Ordered list of attributes with unique keys.
///
/// Insertion order is kept for reproducible output; it has no semantic
/// meaning for consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeList {
    entries: Vec<Attribute>,
}

impl AttributeList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts an attribute.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|a| a.key == key) {
            existing.value = value;
        } else {
            self.entries.push(Attribute { key, value });
        }
    }

    /// Appends every attribute of `other`, with the same replace semantics
    /// as [`insert`](Self::insert).
    pub fn extend(&mut self, other: Self) {
        for Attribute { key, value } in other.entries {
            self.insert(key, value);
        }
    }

    /// Looks up an attribute by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|a| (a.key.as_str(), &a.value))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|a| a.key.as_str())
    }

    /// Converts to `OpenTelemetry` key/values for span and resource attributes.
    #[must_use]
    pub fn to_key_values(&self) -> Vec<KeyValue> {
        self.entries
            .iter()
            .map(|a| KeyValue::new(a.key.clone(), Value::from(a.value.clone())))
            .collect()
    }
}

impl IntoIterator for AttributeList {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_keys_unique() {
        let mut list = AttributeList::new();
        list.insert("scm.type", "git");
        list.insert("scm.branch", "refs/heads/main");
        list.insert("scm.type", "git2");

        assert_eq!(list.len(), 2);
        assert_eq!(list.keys().collect::<Vec<_>>(), vec!["scm.type", "scm.branch"]);
        assert_eq!(list.get("scm.type").and_then(AttributeValue::as_str), Some("git2"));
    }

    #[test]
    fn test_extend_merges() {
        let mut base = AttributeList::new();
        base.insert("a", 1_i64);

        let mut delta = AttributeList::new();
        delta.insert("b", true);
        delta.insert("a", 2_i64);
        base.extend(delta);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("a").and_then(AttributeValue::as_int), Some(2));
        assert_eq!(base.get("b").and_then(AttributeValue::as_bool), Some(true));
    }

    #[test]
    fn test_u64_saturates() {
        assert_eq!(AttributeValue::from(u64::MAX), AttributeValue::Int(i64::MAX));
        assert_eq!(AttributeValue::from(7_u64), AttributeValue::Int(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("git").to_string(), "git");
        assert_eq!(AttributeValue::Int(3).to_string(), "3");
        assert_eq!(
            AttributeValue::StringSet(vec!["a".into(), "b".into()]).to_string(),
            "[a, b]"
        );
    }

    #[test]
    fn test_to_key_values() {
        let mut list = AttributeList::new();
        list.insert("scm.type", "git");
        list.insert("scm.git.clone.depth", 0_i64);
        list.insert("scm.git.clone.shallow", false);
        list.insert("scm.authors", vec!["a@test.com".to_string()]);

        let kvs = list.to_key_values();
        assert_eq!(kvs.len(), 4);
        assert_eq!(kvs[0].key.as_str(), "scm.type");
        assert_eq!(kvs[0].value, Value::from("git"));
        assert_eq!(kvs[1].value, Value::I64(0));
        assert_eq!(kvs[2].value, Value::Bool(false));
        assert_eq!(
            kvs[3].value,
            Value::Array(Array::String(vec![StringValue::from("a@test.com")]))
        );
    }

    #[test]
    fn test_serializes_in_order() {
        let mut list = AttributeList::new();
        list.insert("scm.type", "git");
        list.insert("scm.git.clone.depth", 3_i64);

        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(
            json,
            r#"[{"key":"scm.type","value":"git"},{"key":"scm.git.clone.depth","value":3}]"#
        );
    }
}
