//! # Settings Structure
//!
//! The options a Mnemosyne instance recognises on construction.

use errors::MnemosyneError;
use mn_core::{Mapping, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// File name looked up under the template roots when none is configured.
pub const DEFAULT_STORAGE_FILE: &str = "defaults.mnemosyne.yaml";

const KNOWN_SETTINGS: [&str; 3] = ["emit_exceptions", "storage_file", "storage_path"];

/// Construction-time options.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Enumerates exactly the options a Mnemosyne instance understands. Anything
/// else is rejected when the settings are built.
///
/// ## Usage
/// ```rust
/// use config::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.emit_exceptions);
/// assert_eq!(settings.storage_file, "defaults.mnemosyne.yaml");
/// ```
///
/// ## Fields
/// - `emit_exceptions`: return failures to the caller instead of recording
///   them in the diagnostic list (default: false)
/// - `storage_file`: defaults file name, relative to a template root
///   (default: "defaults.mnemosyne.yaml")
/// - `storage_path`: directory holding the defaults file; bypasses discovery
///   when set. `false` in a settings file means unset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub emit_exceptions: bool,

    #[serde(default = "default_storage_file")]
    #[validate(
        length(min = 1, max = 255),
        custom(function = "validate_storage_file")
    )]
    pub storage_file: String,

    #[serde(default, deserialize_with = "deserialize_storage_path")]
    pub storage_path: Option<PathBuf>
}

fn default_storage_file() -> String {
    DEFAULT_STORAGE_FILE.to_string()
}

fn validate_storage_file(value: &str) -> Result<(), validator::ValidationError> {
    if Path::new(value).is_absolute() {
        return Err(validator::ValidationError::new(
            "storage_file must be relative to a template root"
        ));
    }
    Ok(())
}

fn deserialize_storage_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStoragePath {
        Path(PathBuf),
        Flag(bool)
    }

    match Option::<RawStoragePath>::deserialize(deserializer)? {
        None | Some(RawStoragePath::Flag(false)) => Ok(None),
        Some(RawStoragePath::Path(path)) => Ok(Some(path)),
        Some(RawStoragePath::Flag(true)) => Err(serde::de::Error::custom(
            "storage_path must be a directory path or false"
        ))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            emit_exceptions: false,
            storage_file: default_storage_file(),
            storage_path: None
        }
    }
}

impl Settings {
    /// Build settings from a dynamic option map.
    ///
    /// Option names are checked before any value is interpreted, so the first
    /// unknown name is reported as `UnknownSetting`. Bad values and failed
    /// validation are reported as `InvalidSettings`.
    pub fn from_mapping(options: &Mapping) -> Result<Self, MnemosyneError> {
        for name in options.keys() {
            let name = match name {
                Value::String(name) => name.as_str(),
                other => {
                    return Err(MnemosyneError::UnknownSetting {
                        name: format!("{other:?}")
                    });
                }
            };
            if !KNOWN_SETTINGS.contains(&name) {
                return Err(MnemosyneError::UnknownSetting {
                    name: name.to_string()
                });
            }
        }

        let settings: Self = serde_yaml::from_value(Value::Mapping(options.clone())).map_err(
            |e| MnemosyneError::InvalidSettings {
                reason: e.to_string()
            }
        )?;
        settings.checked()
    }

    /// Validate, converting failures into `InvalidSettings`.
    pub fn checked(self) -> Result<Self, MnemosyneError> {
        self.validate()
            .map_err(|e| MnemosyneError::InvalidSettings {
                reason: e.to_string()
            })?;
        Ok(self)
    }

    pub fn with_emit_exceptions(mut self, emit: bool) -> Self {
        self.emit_exceptions = emit;
        self
    }

    pub fn with_storage_file(mut self, file: impl Into<String>) -> Self {
        self.storage_file = file.into();
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }
}
