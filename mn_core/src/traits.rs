//! Collaborator traits consumed by the defaults store.

use crate::types::{DefaultsMapping, Value};
use errors::MnemosyneError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of searching for a defaults file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    Found(PathBuf),
    NotFound,
    /// More than one candidate matched; no tie-break is attempted.
    Ambiguous(Vec<PathBuf>)
}

/// Resolves a configured defaults filename to a single path on disk.
pub trait FileLocator: Send + Sync {
    /// `search_path`, when given, replaces discovery entirely: only
    /// `search_path/file` is considered.
    fn locate(&self, file: &str, search_path: Option<&Path>) -> LocateOutcome;
}

/// Reads a located defaults file and parses it into a mapping.
pub trait FileLoader: Send + Sync {
    fn read_and_parse(&self, path: &Path) -> Result<DefaultsMapping, MnemosyneError>;
}

/// Process-wide slot holding parsed defaults under a fixed identifier.
///
/// Implementations must make a stored mapping visible to readers atomically;
/// a reader sees either nothing or the complete mapping.
pub trait ProcessCache: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<DefaultsMapping>>;

    fn set(&self, id: &str, mapping: Arc<DefaultsMapping>);

    /// Drop every cached mapping, e.g. at the start of a new request.
    fn clear(&self);
}

/// Read access to defaults by key, as consumed by the resolver.
pub trait DefaultsProvider: Send + Sync {
    /// The validated default for `key`.
    ///
    /// Fails with `KeyNotFound` when the key is absent and with
    /// `InvalidDefaultType` when the stored value is not valid content.
    fn get_default(&self, key: &str) -> Result<Value, MnemosyneError>;
}
