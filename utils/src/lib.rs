//! # Mnemosyne Utilities
//!
//! Pure predicates gating keys and values before they reach the resolver or
//! leave the defaults store.

use mn_core::Value;
use regex::Regex;
use std::sync::LazyLock;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("key pattern is a valid regex"));

/// Validate a default key: non-empty, ASCII letters, digits and underscores.
///
/// # Examples
///
/// ```
/// use utils::is_valid_key;
///
/// assert!(is_valid_key("site_title"));
/// assert!(!is_valid_key("site-title"));
/// ```
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Validate that a value is meaningful content.
///
/// Strings, integers, booleans, sequences and mappings are valid. A boolean is
/// valid whatever its value: this checks the type, not truthiness. Floats,
/// `null` and tagged values are not.
#[must_use]
pub fn is_valid_value(value: &Value) -> bool {
    match value {
        Value::String(_) | Value::Bool(_) | Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::Null | Value::Tagged(_) => false
    }
}

/// Name of a value's runtime type, for diagnostics.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "object"
    }
}
