//! # Storage Layer
//!
//! Locates, loads and caches the defaults file.
//!
//! The parsed defaults live in a process-wide cache owned by a
//! [`ProcessContext`], so the file is read and parsed at most once for as
//! long as the context lives.

pub mod context;
pub mod defaults;
pub mod error_log;
pub mod loader;
pub mod locator;

pub use context::{InMemoryProcessCache, ProcessContext};
pub use defaults::{DEFAULTS_CACHE_ID, DefaultsSource, DefaultsStore};
pub use error_log::ErrorLog;
pub use loader::YamlFileLoader;
pub use locator::TemplateLocator;
