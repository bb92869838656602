//! # Settings
//!
//! Construction-time options for a Mnemosyne instance.
//!
//! This crate provides:
//! - The `Settings` structure enumerating the recognised options
//! - Construction from a dynamic option map, rejecting unknown options
//! - Settings file loading (TOML/YAML)
//! - Settings validation
//!
//! # Best Practices
//!
//! - Uses `validator` crate for input validation
//! - Unknown options are errors, never silently ignored

pub mod file_loader;
pub mod settings;

pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use settings::{DEFAULT_STORAGE_FILE, Settings};
