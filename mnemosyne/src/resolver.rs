//! # Override Resolution
//!
//! Chooses between a caller's override and the stored default for a key.

use errors::MnemosyneError;
use mn_core::{DefaultsProvider, OverrideValidator, Truthy, Value};
use utils::{is_valid_key, is_valid_value, type_name};

/// Resolves a key/override/validator triple against a defaults provider.
///
/// # M-CANONICAL-DOCS
///
/// ## Gates, in order
/// 1. The key must be a string (`InvalidKeyType`).
/// 2. The key must match `[A-Za-z0-9_]+` (`InvalidKeySyntax`).
/// 3. The override must be valid content (`InvalidOverrideType`).
/// 4. With a validator, `validator(override, key)` decides; without one the
///    override's own truthiness decides.
/// 5. A passing override is returned unchanged, otherwise the default is.
///
/// ## Falsy overrides
/// Without a validator, `false`, `0`, `""` and empty collections never count
/// as overrides even though they pass gate 3. Supply a validator to accept
/// them.
pub struct Resolver<'a> {
    defaults: &'a dyn DefaultsProvider
}

impl<'a> Resolver<'a> {
    pub fn new(defaults: &'a dyn DefaultsProvider) -> Self {
        Self { defaults }
    }

    pub fn resolve(
        &self,
        key: &Value,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> Result<Value, MnemosyneError> {
        let Value::String(key) = key else {
            return Err(MnemosyneError::InvalidKeyType {
                found: type_name(key).to_string()
            });
        };

        if !is_valid_key(key) {
            return Err(MnemosyneError::InvalidKeySyntax { key: key.clone() });
        }

        if !is_valid_value(override_value) {
            return Err(MnemosyneError::InvalidOverrideType {
                key: key.clone(),
                found: type_name(override_value).to_string()
            });
        }

        let counts = match validator {
            Some(validate) => validate(override_value, key),
            None => override_value.is_truthy()
        };

        if counts {
            Ok(override_value.clone())
        } else {
            self.defaults.get_default(key)
        }
    }
}
