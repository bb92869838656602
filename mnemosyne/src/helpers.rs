//! Value shaping used by the caller-facing helpers.

use mn_core::Value;

/// Walk nested sequences and mappings along `layers`.
///
/// Sequences are indexed by non-negative integer layers; mappings are looked
/// up by key equality. Returns `None` as soon as a layer is missing, or when
/// the value reached is `null`.
pub fn dig_into(value: &Value, layers: &[Value]) -> Option<Value> {
    layers
        .iter()
        .try_fold(value, |carry, layer| match carry {
            Value::Sequence(items) => layer
                .as_u64()
                .and_then(|index| usize::try_from(index).ok())
                .and_then(|index| items.get(index)),
            Value::Mapping(map) => map
                .iter()
                .find(|(key, _)| *key == layer)
                .map(|(_, value)| value),
            _ => None
        })
        .filter(|value| !value.is_null())
        .cloned()
}

/// Text form of a value that can be written straight into a template.
///
/// Only strings and integers qualify.
pub fn printable(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None
    }
}
