//! # Option Model
//!
//! Turns whatever the caller handed us into one ordered list of
//! `(label, value)` pairs. Two input shapes are accepted:
//!
//! ```text
//! ["One", "Two", "Three"]          →  (One, 0) (Two, 1) (Three, 2)
//! {"Red": "#f00", "Green": "#0f0"} →  (Red, "#f00") (Green, "#0f0")
//! ```
//!
//! Normalization happens once, before anything is drawn. Duplicate labels
//! are rejected so every highlighted row maps to exactly one value.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::core::config::ConfigError;

/// Caller-supplied options, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsInput {
    /// Plain labels. Each resolves to its position in the list.
    Labels(Vec<String>),
    /// Ordered label → value pairs. Duplicates are caught by `normalize`.
    Pairs(Vec<(String, Value)>),
    /// A JSON object, iterated in insertion order.
    Map(Map<String, Value>),
}

impl OptionsInput {
    /// Parse a JSON document: an array of strings or an object.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        match serde_json::from_str::<Value>(text).map_err(ConfigError::InvalidOptionsJson)? {
            Value::Object(map) => Ok(OptionsInput::Map(map)),
            Value::Array(items) => {
                let labels = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect();
                Ok(OptionsInput::Labels(labels))
            }
            Value::Null => Err(ConfigError::UnsupportedOptionsJson("null")),
            Value::Bool(_) => Err(ConfigError::UnsupportedOptionsJson("a boolean")),
            Value::Number(_) => Err(ConfigError::UnsupportedOptionsJson("a number")),
            Value::String(_) => Err(ConfigError::UnsupportedOptionsJson("a string")),
        }
    }
}

impl From<Vec<String>> for OptionsInput {
    fn from(labels: Vec<String>) -> Self {
        OptionsInput::Labels(labels)
    }
}

impl From<Vec<&str>> for OptionsInput {
    fn from(labels: Vec<&str>) -> Self {
        OptionsInput::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OptionsInput {
    fn from(labels: [&str; N]) -> Self {
        OptionsInput::Labels(labels.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Map<String, Value>> for OptionsInput {
    fn from(map: Map<String, Value>) -> Self {
        OptionsInput::Map(map)
    }
}

impl From<Vec<(String, Value)>> for OptionsInput {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        OptionsInput::Pairs(pairs)
    }
}

/// Non-empty, label-unique, ordered `(label, value)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedOptions<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedOptions<V> {
    /// Build from pairs in their iteration order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let entries: Vec<(String, V)> = pairs.into_iter().collect();
        if entries.is_empty() {
            return Err(ConfigError::EmptyOptions);
        }

        if let Some(label) = first_duplicate(entries.iter().map(|(label, _)| label.as_str())) {
            return Err(ConfigError::DuplicateLabel(label.to_string()));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(label, _)| label.as_str())
    }

    pub fn value(&self, index: usize) -> Option<&V> {
        self.entries.get(index).map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }
}

impl OrderedOptions<usize> {
    /// Labels paired with their positional index.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (label.into(), i)),
        )
    }
}

fn first_duplicate<'a>(mut labels: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    labels.find(|label| !seen.insert(*label))
}

/// Normalize caller input into ordered pairs with JSON values.
///
/// List input resolves to positional indices; object input keeps its own
/// key order and values.
pub fn normalize(input: OptionsInput) -> Result<OrderedOptions<Value>, ConfigError> {
    match input {
        OptionsInput::Labels(labels) => OrderedOptions::from_pairs(
            labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| (label, Value::from(i))),
        ),
        OptionsInput::Pairs(pairs) => OrderedOptions::from_pairs(pairs),
        OptionsInput::Map(map) => OrderedOptions::from_pairs(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_resolve_to_positions() {
        let options = normalize(["One", "Two", "Three"].into()).unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options.label(2), Some("Three"));
        assert_eq!(options.value(0), Some(&json!(0)));
        assert_eq!(options.value(2), Some(&json!(2)));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let input = OptionsInput::from_json(r##"{"Red": "#f00", "Green": "#0f0", "Blue": "#00f"}"##)
            .unwrap();
        let options = normalize(input).unwrap();
        let labels: Vec<&str> = options.labels().collect();
        assert_eq!(labels, vec!["Red", "Green", "Blue"]);
        assert_eq!(options.value(1), Some(&json!("#0f0")));
    }

    #[test]
    fn test_json_array_becomes_labels() {
        let input = OptionsInput::from_json(r#"["a", "b", 3]"#).unwrap();
        assert_eq!(
            input,
            OptionsInput::Labels(vec!["a".into(), "b".into(), "3".into()])
        );
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = OptionsInput::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptionsJson(_)));
    }

    #[test]
    fn test_json_scalars_rejected() {
        for text in ["null", "5", "true", r#""One""#] {
            let err = OptionsInput::from_json(text).unwrap_err();
            assert!(
                matches!(err, ConfigError::UnsupportedOptionsJson(_)),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = normalize(OptionsInput::Labels(Vec::new())).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOptions));
    }

    #[test]
    fn test_empty_map_rejected() {
        let err = normalize(OptionsInput::Map(Map::new())).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyOptions));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = normalize(["A", "A"].into()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel(ref l) if l == "A"));

        let pairs = vec![("x".to_string(), json!(1)), ("x".to_string(), json!(2))];
        let err = normalize(pairs.into()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLabel(_)));
    }

    #[test]
    fn test_from_labels_generic_values() {
        let options = OrderedOptions::from_labels(vec!["first", "second"]).unwrap();
        assert_eq!(options.value(1), Some(&1));
        let pairs: Vec<(&str, &usize)> = options.iter().collect();
        assert_eq!(pairs, vec![("first", &0), ("second", &1)]);
    }
}
