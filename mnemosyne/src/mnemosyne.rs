//! # Mnemosyne Facade
//!
//! Wraps the resolver and the defaults store behind the error posture chosen
//! in [`Settings`]: failures are either returned to the caller or recorded in
//! the context's diagnostic list.

use crate::helpers::{dig_into, printable};
use crate::resolver::Resolver;
use config::Settings;
use errors::MnemosyneError;
use mn_core::{FileLoader, FileLocator, OverrideValidator, Value};
use storage::{DefaultsSource, DefaultsStore, ErrorLog, ProcessContext, YamlFileLoader};
use std::sync::Arc;

/// A configured resolver bound to a process context.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Entry point for templates. Each instance is cheap: the defaults file is
/// parsed once per [`ProcessContext`] and shared by every instance on it.
///
/// ## Error posture
/// - `emit_exceptions = true`: [`Mnemosyne::remember`] and construction return
///   `Err`.
/// - `emit_exceptions = false` (default): the failure is logged, its message
///   is appended to the context's [`ErrorLog`], and the value is `None`.
///
/// The `get_*` helpers always record and never return errors.
pub struct Mnemosyne {
    settings: Settings,
    store: DefaultsStore
}

impl Mnemosyne {
    /// Build an instance on the process-global context, reading YAML defaults.
    pub fn new(settings: Settings, locator: Arc<dyn FileLocator>) -> Result<Self, MnemosyneError> {
        Self::with_context(
            settings,
            ProcessContext::global(),
            locator,
            Arc::new(YamlFileLoader)
        )
    }

    /// Build an instance with every collaborator injected.
    ///
    /// The defaults are loaded eagerly so that a missing, ambiguous or
    /// unreadable defaults file is reported here, through the configured
    /// error posture.
    pub fn with_context(
        settings: Settings,
        context: Arc<ProcessContext>,
        locator: Arc<dyn FileLocator>,
        loader: Arc<dyn FileLoader>,
    ) -> Result<Self, MnemosyneError> {
        let settings = settings.checked()?;
        let source = DefaultsSource::new(locator, loader, &settings);
        let instance = Self {
            settings,
            store: DefaultsStore::new(context, source)
        };

        if let Err(err) = instance.store.load() {
            instance.handle(err)?;
        }
        Ok(instance)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &DefaultsStore {
        &self.store
    }

    pub fn context(&self) -> &Arc<ProcessContext> {
        self.store.context()
    }

    /// Diagnostic messages of handled failures on this instance's context.
    pub fn errors(&self) -> &ErrorLog {
        self.context().errors()
    }

    /// Resolve without any error handling.
    pub fn resolve(
        &self,
        key: &Value,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> Result<Value, MnemosyneError> {
        Resolver::new(&self.store).resolve(key, override_value, validator)
    }

    /// Resolve, applying the configured error posture.
    pub fn remember(
        &self,
        key: &Value,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> Result<Option<Value>, MnemosyneError> {
        match self.resolve(key, override_value, validator) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.handle(err)?;
                Ok(None)
            }
        }
    }

    /// Resolve `key`, recording any failure and returning `None` for it.
    pub fn get_value(
        &self,
        key: &str,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> Option<Value> {
        self.resolve(&Value::from(key), override_value, validator)
            .map_err(|err| self.record(&err))
            .ok()
    }

    /// The default for `key`, ignoring overrides.
    pub fn get_default(&self, key: &str) -> Option<Value> {
        self.get_value(key, &Value::Bool(false), None)
    }

    /// True when the resolved value is present and differs from the default.
    pub fn is_overridden(
        &self,
        key: &str,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> bool {
        let Some(value) = self.get_value(key, override_value, validator) else {
            return false;
        };
        self.get_default(key).as_ref() != Some(&value)
    }

    /// The resolved value as template text.
    ///
    /// Records `ValueNotPrintable` and returns `None` when the value is not a
    /// string or an integer.
    pub fn render_value(
        &self,
        key: &str,
        override_value: &Value,
        validator: Option<&OverrideValidator>,
    ) -> Option<String> {
        let value = self.get_value(key, override_value, validator)?;
        let rendered = printable(&value);
        if rendered.is_none() {
            self.record(&MnemosyneError::ValueNotPrintable {
                key: key.to_string()
            });
        }
        rendered
    }

    /// Resolve `key`, then walk into the result along `layers`.
    ///
    /// Assumes the override and the default share a structure.
    pub fn dig(&self, key: &str, override_value: &Value, layers: &[Value]) -> Option<Value> {
        let value = self.get_value(key, override_value, None)?;
        dig_into(&value, layers)
    }

    /// The override itself when it is in effect, otherwise dig into the
    /// default along `layers`.
    ///
    /// For an unnested override whose default is nested.
    pub fn burrow(&self, key: &str, override_value: &Value, layers: &[Value]) -> Option<Value> {
        if self.is_overridden(key, override_value, None) {
            self.get_value(key, override_value, None)
        } else {
            self.dig(key, override_value, layers)
        }
    }

    fn handle(&self, err: MnemosyneError) -> Result<(), MnemosyneError> {
        if self.settings.emit_exceptions {
            return Err(err);
        }
        self.record(&err);
        Ok(())
    }

    fn record(&self, err: &MnemosyneError) {
        tracing::warn!(kind = err.kind(), error = %err, "Handled resolution failure");
        self.errors().record(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mn_core::{DefaultsMapping, LocateOutcome};
    use std::path::{Path, PathBuf};

    struct FixedLocator(LocateOutcome);

    impl FileLocator for FixedLocator {
        fn locate(&self, _file: &str, _search_path: Option<&Path>) -> LocateOutcome {
            self.0.clone()
        }
    }

    struct StaticLoader(&'static str);

    impl FileLoader for StaticLoader {
        fn read_and_parse(&self, _path: &Path) -> Result<DefaultsMapping, MnemosyneError> {
            let document: Value = serde_yaml::from_str(self.0).unwrap();
            Ok(DefaultsMapping::from_document(document).unwrap())
        }
    }

    const DEFAULTS: &str = "\
site_title: My Theme
show_sidebar: true
copyright_year: 2024
menu:
  primary: [home, about]
footer:
  - text: Made with care
";

    fn build(settings: Settings, outcome: LocateOutcome) -> Result<Mnemosyne, MnemosyneError> {
        Mnemosyne::with_context(
            settings,
            Arc::new(ProcessContext::new()),
            Arc::new(FixedLocator(outcome)),
            Arc::new(StaticLoader(DEFAULTS))
        )
    }

    fn found() -> LocateOutcome {
        LocateOutcome::Found(PathBuf::from("/theme/defaults.mnemosyne.yaml"))
    }

    fn handled() -> Mnemosyne {
        build(Settings::default(), found()).unwrap()
    }

    #[test]
    fn test_remember_handled_records_error() {
        let mnemosyne = handled();

        let value = mnemosyne
            .remember(&Value::from("missing_key"), &Value::from(""), None)
            .unwrap();

        assert_eq!(value, None);
        assert_eq!(
            mnemosyne.errors().messages(),
            vec!["The key `missing_key` does not exist."]
        );
    }

    #[test]
    fn test_remember_emit_returns_error() {
        let mnemosyne = build(Settings::default().with_emit_exceptions(true), found()).unwrap();

        let result = mnemosyne.remember(&Value::from("foo-bar"), &Value::from("x"), None);

        assert!(matches!(result, Err(MnemosyneError::InvalidKeySyntax { .. })));
        assert!(mnemosyne.errors().is_empty());
    }

    #[test]
    fn test_construction_storage_failure_handled() {
        let mnemosyne = build(Settings::default(), LocateOutcome::NotFound).unwrap();

        assert_eq!(mnemosyne.errors().len(), 1);
        assert_eq!(mnemosyne.get_default("site_title"), None);
        assert_eq!(mnemosyne.errors().len(), 2);
    }

    #[test]
    fn test_construction_storage_failure_emitted() {
        let result = build(
            Settings::default().with_emit_exceptions(true),
            LocateOutcome::Ambiguous(vec![PathBuf::from("/a"), PathBuf::from("/b")])
        );
        assert!(matches!(result, Err(MnemosyneError::StorageAmbiguous { .. })));
    }

    #[test]
    fn test_construction_rejects_invalid_settings() {
        let result = build(Settings::default().with_storage_file(""), found());
        assert!(matches!(result, Err(MnemosyneError::InvalidSettings { .. })));
    }

    #[test]
    fn test_get_value_records_even_when_emitting() {
        let mnemosyne = build(Settings::default().with_emit_exceptions(true), found()).unwrap();

        assert_eq!(mnemosyne.get_value("missing_key", &Value::from(""), None), None);
        assert_eq!(mnemosyne.errors().len(), 1);
    }

    #[test]
    fn test_get_default_ignores_override() {
        let mnemosyne = handled();
        assert_eq!(
            mnemosyne.get_default("site_title"),
            Some(Value::from("My Theme"))
        );
    }

    #[test]
    fn test_is_overridden() {
        let mnemosyne = handled();

        assert!(mnemosyne.is_overridden("site_title", &Value::from("Custom"), None));
        assert!(!mnemosyne.is_overridden("site_title", &Value::from("My Theme"), None));
        assert!(!mnemosyne.is_overridden("site_title", &Value::from(""), None));
        assert!(!mnemosyne.is_overridden("site_title", &Value::Null, None));
    }

    #[test]
    fn test_is_overridden_with_validator_accepting_false() {
        let mnemosyne = handled();
        let is_bool = |value: &Value, _: &str| value.is_bool();

        assert!(mnemosyne.is_overridden("show_sidebar", &Value::Bool(false), Some(&is_bool)));
    }

    #[test]
    fn test_render_value() {
        let mnemosyne = handled();

        assert_eq!(
            mnemosyne.render_value("site_title", &Value::from(""), None),
            Some("My Theme".to_string())
        );
        assert_eq!(
            mnemosyne.render_value("copyright_year", &Value::from(0), None),
            Some("2024".to_string())
        );
        assert!(mnemosyne.errors().is_empty());
    }

    #[test]
    fn test_render_value_not_printable() {
        let mnemosyne = handled();

        assert_eq!(mnemosyne.render_value("menu", &Value::from(""), None), None);
        assert_eq!(
            mnemosyne.errors().messages(),
            vec!["The value for key `menu` cannot be converted to a string."]
        );
    }

    #[test]
    fn test_dig_into_default() {
        let mnemosyne = handled();

        assert_eq!(
            mnemosyne.dig(
                "menu",
                &Value::from(""),
                &[Value::from("primary"), Value::from(1)]
            ),
            Some(Value::from("about"))
        );
        assert_eq!(
            mnemosyne.dig("menu", &Value::from(""), &[Value::from("secondary")]),
            None
        );
    }

    #[test]
    fn test_burrow_prefers_unnested_override() {
        let mnemosyne = handled();
        let layers = [Value::from(0), Value::from("text")];

        assert_eq!(
            mnemosyne.burrow("footer", &Value::from("Custom footer"), &layers),
            Some(Value::from("Custom footer"))
        );
        assert_eq!(
            mnemosyne.burrow("footer", &Value::from(""), &layers),
            Some(Value::from("Made with care"))
        );
    }
}
