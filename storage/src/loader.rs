//! Reads and parses a YAML defaults file.

use errors::MnemosyneError;
use mn_core::{DefaultsMapping, FileLoader, Value};
use std::path::Path;

/// Loads a defaults file written in YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileLoader;

impl FileLoader for YamlFileLoader {
    fn read_and_parse(&self, path: &Path) -> Result<DefaultsMapping, MnemosyneError> {
        let unreadable = |reason: String| MnemosyneError::StorageUnreadable {
            path: path.to_path_buf(),
            reason
        };

        let contents = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let document: Value =
            serde_yaml::from_str(&contents).map_err(|e| unreadable(e.to_string()))?;

        DefaultsMapping::from_document(document).map_err(unreadable)
    }
}
