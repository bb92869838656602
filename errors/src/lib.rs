//! # Mnemosyne Errors
//!
//! Every failure the resolver, the defaults store and their collaborators can
//! produce.
//!
//! Uses `thiserror` for structured error definitions. Each variant carries the
//! context needed to print a human-readable diagnostic without the caller
//! having to know which stage failed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a key to an override or a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemosyneError {
    #[error("The supplied key is of type `{found}`. Must be a string.")]
    InvalidKeyType { found: String },

    #[error("The key `{key}` is not a valid key (only alphanumeric and underscores allowed).")]
    InvalidKeySyntax { key: String },

    #[error("The override for key `{key}` is of invalid type `{found}`. Must be string, int, bool, or array.")]
    InvalidOverrideType { key: String, found: String },

    #[error("The default for key `{key}` is of invalid type `{found}`. Must be string, int, bool, or array.")]
    InvalidDefaultType { key: String, found: String },

    #[error("The key `{key}` does not exist.")]
    KeyNotFound { key: String },

    #[error("Could not find a file to load at `{file}`.")]
    StorageNotFound { file: String },

    #[error("Found more than one file matching `{file}`: {candidates:?}")]
    StorageAmbiguous {
        file: String,
        candidates: Vec<PathBuf>
    },

    #[error("The file `{}` does not exist, or is inaccessible: {reason}", path.display())]
    StorageUnreadable { path: PathBuf, reason: String },

    #[error("Cannot set {name}, it does not exist.")]
    UnknownSetting { name: String },

    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("The value for key `{key}` cannot be converted to a string.")]
    ValueNotPrintable { key: String }
}

impl MnemosyneError {
    /// Stable snake_case name of the error kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidKeyType { .. } => "invalid_key_type",
            Self::InvalidKeySyntax { .. } => "invalid_key_syntax",
            Self::InvalidOverrideType { .. } => "invalid_override_type",
            Self::InvalidDefaultType { .. } => "invalid_default_type",
            Self::KeyNotFound { .. } => "key_not_found",
            Self::StorageNotFound { .. } => "storage_not_found",
            Self::StorageAmbiguous { .. } => "storage_ambiguous",
            Self::StorageUnreadable { .. } => "storage_unreadable",
            Self::UnknownSetting { .. } => "unknown_setting",
            Self::InvalidSettings { .. } => "invalid_settings",
            Self::ValueNotPrintable { .. } => "value_not_printable"
        }
    }

    /// True for failures to locate or read the defaults source.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::StorageNotFound { .. }
                | Self::StorageAmbiguous { .. }
                | Self::StorageUnreadable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MnemosyneError>;
