//! # Mnemosyne Core
//!
//! Shared types and traits for the Mnemosyne defaults resolver.
//!
//! This crate provides:
//! - The dynamic `Value` model shared by overrides and defaults
//! - `DefaultsMapping`, the parsed contents of a defaults file
//! - Collaborator traits for locating, loading and caching defaults

pub mod traits;
pub mod types;

pub use traits::{DefaultsProvider, FileLoader, FileLocator, LocateOutcome, ProcessCache};
pub use types::{DefaultsMapping, Mapping, OverrideValidator, Truthy, Value};
