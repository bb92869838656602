//! # Mnemosyne
//!
//! Hard-coded defaults that a theme's caller can override.
//!
//! A template asks for a value by key and passes whatever override it has.
//! The override wins when it "counts" (it is truthy, or a caller-supplied
//! validator accepts it); otherwise the default loaded from the theme's
//! defaults file is returned.
//!
//! ```rust,no_run
//! use mnemosyne::{Mnemosyne, Settings, TemplateLocator, Value};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), mnemosyne::MnemosyneError> {
//!     let locator = Arc::new(TemplateLocator::new(["/srv/themes/child", "/srv/themes/parent"]));
//!     let mnemosyne = Mnemosyne::new(Settings::default(), locator)?;
//!
//!     let title = mnemosyne.get_value("site_title", &Value::from(""), None);
//!     println!("{title:?}");
//!     Ok(())
//! }
//! ```

pub mod helpers;
pub mod mnemosyne;
pub mod resolver;

pub use config::Settings;
pub use errors::MnemosyneError;
pub use mn_core::{DefaultsProvider, FileLoader, FileLocator, OverrideValidator, Value};
pub use mnemosyne::Mnemosyne;
pub use resolver::Resolver;
pub use storage::{ErrorLog, ProcessContext, TemplateLocator, YamlFileLoader};
