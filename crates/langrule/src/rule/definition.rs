use std::fmt::{Formatter, Result as FmtResult};

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A single value in a rule definition: a flag or a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionValue {
    Flag(bool),
    Text(String),
}

impl DefinitionValue {
    /// The text of this value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DefinitionValue::Text(s) => Some(s),
            DefinitionValue::Flag(_) => None,
        }
    }

    /// Interpret this value as a flag.
    ///
    /// Definitions coming from web forms carry flags as text, so `"true"`,
    /// `"1"`, `"false"`, `"0"` and `""` are accepted as well.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefinitionValue::Flag(b) => Some(*b),
            DefinitionValue::Text(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" | "" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<bool> for DefinitionValue {
    fn from(b: bool) -> Self {
        DefinitionValue::Flag(b)
    }
}

impl From<&str> for DefinitionValue {
    fn from(s: &str) -> Self {
        DefinitionValue::Text(s.to_string())
    }
}

impl From<String> for DefinitionValue {
    fn from(s: String) -> Self {
        DefinitionValue::Text(s)
    }
}

impl Serialize for DefinitionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefinitionValue::Flag(b) => serializer.serialize_bool(*b),
            DefinitionValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DefinitionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefinitionValueVisitor)
    }
}

/// Accepts booleans, strings and numbers. Numbers become [`DefinitionValue::Text`].
struct DefinitionValueVisitor;

impl Visitor<'_> for DefinitionValueVisitor {
    type Value = DefinitionValue;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a boolean, string or number")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(DefinitionValue::Text(v))
    }
}

/// The conditions a rule encodes, as an ordered map of normalized keys.
///
/// Keys are trimmed and lowercased once, when the definition is built or
/// deserialized, and lookups normalize the requested key the same way. A
/// definition therefore reads the same whether it was authored as
/// `{"Part1": ...}` or `{"part1": ...}`.
///
/// Equality is exact on entries and ignores their order: `"1"` and `true`
/// are different values, but `{part1, value1}` equals `{value1, part1}`.
/// Deserialized numbers are read as their text, so `{"value1": 1}` and
/// `{"value1": "1"}` produce equal definitions.
///
/// # Example
///
/// ```
/// use langrule::Definition;
///
/// let definition = Definition::new()
///     .with("multipart", true)
///     .with("part1", "ends_in")
///     .with("Value1", "2,3,4")
///     .with("operator", "and")
///     .with("part2", "does_not_end_in")
///     .with("value2", "12,13,14");
///
/// assert_eq!(definition.text("VALUE1"), Some("2,3,4"));
/// assert_eq!(definition.flag("multipart"), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, DefinitionValue>", into = "IndexMap<String, DefinitionValue>")]
pub struct Definition {
    entries: IndexMap<String, DefinitionValue>,
}

impl Definition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<DefinitionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: &str,
        value: impl Into<DefinitionValue>,
    ) -> Option<DefinitionValue> {
        self.entries.insert(normalize_key(key), value.into())
    }

    /// Remove an entry, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<DefinitionValue> {
        self.entries.shift_remove(&normalize_key(key))
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&DefinitionValue> {
        self.entries.get(&normalize_key(key))
    }

    /// Check if the definition has a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Text value for a key; `None` if absent or a flag.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(DefinitionValue::as_str)
    }

    /// Flag value for a key; `None` if absent or not a recognizable flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(DefinitionValue::as_bool)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefinitionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the definition has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, DefinitionValue>> for Definition {
    fn from(raw: IndexMap<String, DefinitionValue>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Definition> for IndexMap<String, DefinitionValue> {
    fn from(definition: Definition) -> Self {
        definition.entries
    }
}

impl<K: AsRef<str>, V: Into<DefinitionValue>> FromIterator<(K, V)> for Definition {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut definition = Definition::new();
        for (key, value) in iter {
            definition.insert(key.as_ref(), value);
        }
        definition
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized_once() {
        let definition = Definition::new().with(" Part1 ", "is").with("VALUE1", "1");
        let keys: Vec<&str> = definition.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["part1", "value1"]);
        assert_eq!(definition.text("part1"), Some("is"));
        assert_eq!(definition.text("Value1"), Some("1"));
    }

    #[test]
    fn deserialization_normalizes_keys_and_numbers() {
        let definition: Definition =
            serde_json::from_str(r#"{"Part1": "is", "value1": 1, "multipart": false}"#).unwrap();
        assert_eq!(definition.text("part1"), Some("is"));
        assert_eq!(definition.text("value1"), Some("1"));
        assert_eq!(definition.flag("multipart"), Some(false));
    }

    #[test]
    fn serialization_preserves_order() {
        let definition = Definition::new().with("part1", "is").with("value1", "1");
        assert_eq!(
            serde_json::to_string(&definition).unwrap(),
            r#"{"part1":"is","value1":"1"}"#
        );
    }

    #[test]
    fn equality_ignores_order_but_not_values() {
        let a = Definition::new().with("part1", "is").with("value1", "1");
        let b = Definition::new().with("value1", "1").with("part1", "is");
        let c = Definition::new().with("PART1", "is").with("value1", "1");
        let d = Definition::new().with("part1", "is").with("value1", true);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn text_flags_are_recognized() {
        let definition = Definition::new().with("multipart", "true");
        assert_eq!(definition.flag("multipart"), Some(true));
        assert_eq!(definition.text("multipart"), Some("true"));
    }

    #[test]
    fn array_values_are_rejected() {
        let result: Result<Definition, _> = serde_json::from_str(r#"{"value1": [1, 2]}"#);
        assert!(result.is_err());
    }
}
