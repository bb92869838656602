//! Core value types shared by overrides and defaults.

use std::collections::HashMap;

/// A dynamic value as produced by a YAML document or supplied by a caller.
///
/// Only strings, integers, booleans, sequences and mappings count as content;
/// floats, `null` and tagged values exist so that invalid input can be
/// represented and rejected.
pub type Value = serde_yaml::Value;

pub use serde_yaml::Mapping;
pub use serde_yaml::value::{Tag, TaggedValue};

/// Caller-supplied predicate deciding whether an override counts.
///
/// Invoked as `validator(override, key)`.
pub type OverrideValidator = dyn Fn(&Value, &str) -> bool + Send + Sync;

/// Loose truthiness used to decide whether an override "counts".
///
/// `false`, `0`, `0.0`, `""`, empty sequences, empty mappings and `null` are
/// falsy. Everything else is truthy, including the string `"0"`.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for Value {
    #[allow(clippy::float_cmp)]
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i != 0
                } else if let Some(u) = n.as_u64() {
                    u != 0
                } else {
                    n.as_f64().is_none_or(|f| f != 0.0)
                }
            }
            Value::String(s) => !s.is_empty(),
            Value::Sequence(seq) => !seq.is_empty(),
            Value::Mapping(map) => !map.is_empty(),
            Value::Tagged(_) => true
        }
    }
}

/// Parsed contents of a defaults file, keyed by default name.
///
/// Immutable once built; shared between readers as `Arc<DefaultsMapping>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsMapping {
    entries: HashMap<String, Value>
}

impl DefaultsMapping {
    /// Build a mapping from a parsed YAML document.
    ///
    /// An empty document (`null`) yields an empty mapping. Top-level keys that
    /// are not strings are skipped. Any other top-level shape is rejected with
    /// a human-readable reason.
    pub fn from_document(document: Value) -> Result<Self, String> {
        match document {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => {
                let mut entries = HashMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    match key {
                        Value::String(key) => {
                            entries.insert(key, value);
                        }
                        other => {
                            tracing::warn!(key = ?other, "Skipping default with a non-string key");
                        }
                    }
                }
                Ok(Self { entries })
            }
            other => Err(format!(
                "expected a mapping of defaults at the top level, found {}",
                shape_name(&other)
            ))
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for DefaultsMapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect()
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value"
    }
}
