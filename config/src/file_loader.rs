//! # Settings File Loading
//!
//! Loads settings from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::settings::Settings;
use std::path::Path;

/// Settings file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("Settings file has no extension")]
    NoExtension,

    #[error("Unsupported settings file format: {0}")]
    UnsupportedFormat(String)
}

/// Load settings from a TOML file.
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Invalid TOML syntax or unknown options
/// - Values failing validation
pub fn load_from_toml(path: &Path) -> Result<Settings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    let settings: Settings =
        toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))?;

    validated(settings)
}

/// Load settings from a YAML file.
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Invalid YAML syntax or unknown options
/// - Values failing validation
pub fn load_from_yaml(path: &Path) -> Result<Settings, ConfigFileError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_e| ConfigFileError::FileNotFound(path.display().to_string()))?;

    let settings: Settings =
        serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))?;

    validated(settings)
}

/// Load settings from file with auto-detection.
///
/// # M-CANONICAL-DOCS
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml`: YAML format
/// - `.yml`: YAML format
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_file;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = load_from_file(Path::new("mnemosyne.toml"))?;
///     println!("emit_exceptions: {}", settings.emit_exceptions);
///     Ok(())
/// }
/// ```
pub fn load_from_file(path: &Path) -> Result<Settings, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    let settings = match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string()))
    }?;

    tracing::debug!(path = %path.display(), "Loaded settings file");
    Ok(settings)
}

fn validated(settings: Settings) -> Result<Settings, ConfigFileError> {
    settings
        .checked()
        .map_err(|e| ConfigFileError::Invalid(e.to_string()))
}
