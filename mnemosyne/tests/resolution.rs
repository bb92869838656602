//! End-to-end resolution against a defaults file on disk.

use mnemosyne::{
    FileLoader, Mnemosyne, MnemosyneError, ProcessContext, Settings, TemplateLocator, Value,
    YamlFileLoader
};
use mn_core::DefaultsMapping;
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const DEFAULTS: &str = "\
site_title: My Theme
show_sidebar: true
posts_per_page: 10
social: [twitter, mastodon]
";

/// Theme directory holding a defaults file.
fn theme() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("defaults.mnemosyne.yaml"), DEFAULTS).unwrap();
    dir
}

struct CountingYamlLoader {
    calls: AtomicUsize
}

impl FileLoader for CountingYamlLoader {
    fn read_and_parse(&self, path: &Path) -> Result<DefaultsMapping, MnemosyneError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        YamlFileLoader.read_and_parse(path)
    }
}

fn mnemosyne_for(theme: &TempDir, context: &Arc<ProcessContext>) -> Mnemosyne {
    Mnemosyne::with_context(
        Settings::default().with_emit_exceptions(true),
        Arc::clone(context),
        Arc::new(TemplateLocator::new([theme.path()])),
        Arc::new(YamlFileLoader)
    )
    .unwrap()
}

#[test]
fn truthy_overrides_are_returned_unchanged() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let mnemosyne = mnemosyne_for(&theme, &context);

    for (key, value) in [
        ("site_title", Value::from("Custom Title")),
        ("posts_per_page", Value::from(25)),
        ("show_sidebar", Value::Bool(true)),
        ("social", serde_yaml::from_str("[rss]").unwrap()),
    ] {
        assert_eq!(
            mnemosyne.resolve(&Value::from(key), &value, None).unwrap(),
            value
        );
    }
}

#[test]
fn falsy_overrides_fall_back_to_the_default() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let mnemosyne = mnemosyne_for(&theme, &context);

    let cases = [
        ("show_sidebar", Value::Bool(false), Value::Bool(true)),
        ("posts_per_page", Value::from(0), Value::from(10)),
        ("site_title", Value::from(""), Value::from("My Theme")),
        (
            "social",
            Value::Sequence(Vec::new()),
            serde_yaml::from_str("[twitter, mastodon]").unwrap()
        ),
    ];
    for (key, falsy, expected) in cases {
        assert_eq!(
            mnemosyne.resolve(&Value::from(key), &falsy, None).unwrap(),
            expected,
            "override {falsy:?} for {key} should fall through"
        );
    }
}

#[test]
fn validator_decides_when_supplied() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let mnemosyne = mnemosyne_for(&theme, &context);
    let positive = |value: &Value, _: &str| value.as_i64().is_some_and(|n| n > 0);

    assert_eq!(
        mnemosyne
            .resolve(&Value::from("posts_per_page"), &Value::from(5), Some(&positive))
            .unwrap(),
        Value::from(5)
    );
    assert_eq!(
        mnemosyne
            .resolve(&Value::from("posts_per_page"), &Value::from(-5), Some(&positive))
            .unwrap(),
        Value::from(10)
    );
}

#[test]
fn missing_key_with_falsy_override_is_key_not_found() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let mnemosyne = mnemosyne_for(&theme, &context);

    assert_eq!(
        mnemosyne.resolve(&Value::from("missing_key"), &Value::from(""), None),
        Err(MnemosyneError::KeyNotFound {
            key: "missing_key".to_string()
        })
    );
    assert_eq!(
        mnemosyne
            .resolve(&Value::from("missing_key"), &Value::from("x"), None)
            .unwrap(),
        Value::from("x")
    );
}

#[test]
fn malformed_default_surfaces_as_invalid_default_type() {
    let theme = TempDir::new().unwrap();
    fs::write(
        theme.path().join("defaults.mnemosyne.yaml"),
        "ratio: 1.5\nsite_title: My Theme\n"
    )
    .unwrap();
    let expected = MnemosyneError::InvalidDefaultType {
        key: "ratio".to_string(),
        found: "float".to_string()
    };

    let context = Arc::new(ProcessContext::new());
    let emitting = mnemosyne_for(&theme, &context);
    assert_eq!(
        emitting.resolve(&Value::from("ratio"), &Value::from(0), None),
        Err(expected.clone())
    );
    assert_eq!(
        emitting.remember(&Value::from("ratio"), &Value::from(0), None),
        Err(expected.clone())
    );
    assert_eq!(
        emitting
            .resolve(&Value::from("ratio"), &Value::from(2), None)
            .unwrap(),
        Value::from(2)
    );

    let handled = Mnemosyne::with_context(
        Settings::default(),
        Arc::new(ProcessContext::new()),
        Arc::new(TemplateLocator::new([theme.path()])),
        Arc::new(YamlFileLoader)
    )
    .unwrap();
    assert_eq!(
        handled
            .remember(&Value::from("ratio"), &Value::from(""), None)
            .unwrap(),
        None
    );
    assert_eq!(handled.errors().messages(), vec![expected.to_string()]);
}

#[test]
fn defaults_file_is_read_once_per_context() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let loader = Arc::new(CountingYamlLoader {
        calls: AtomicUsize::new(0)
    });

    for _ in 0..3 {
        let mnemosyne = Mnemosyne::with_context(
            Settings::default(),
            Arc::clone(&context),
            Arc::new(TemplateLocator::new([theme.path()])),
            Arc::clone(&loader) as Arc<dyn FileLoader>
        )
        .unwrap();
        assert_eq!(
            mnemosyne.get_default("site_title"),
            mnemosyne.get_default("site_title")
        );
    }

    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn ambiguous_defaults_are_reported() {
    let child = theme();
    let parent = theme();
    let context = Arc::new(ProcessContext::new());

    let handled = Mnemosyne::with_context(
        Settings::default(),
        Arc::clone(&context),
        Arc::new(TemplateLocator::new([child.path(), parent.path()])),
        Arc::new(YamlFileLoader)
    )
    .unwrap();

    assert_eq!(handled.errors().len(), 1);
    assert!(handled.errors().messages()[0].contains("more than one file"));
    assert_eq!(handled.get_value("site_title", &Value::from(""), None), None);
}

#[test]
fn storage_path_bypasses_discovery() {
    let child = theme();
    let parent = theme();
    let context = Arc::new(ProcessContext::new());

    let mnemosyne = Mnemosyne::with_context(
        Settings::default()
            .with_emit_exceptions(true)
            .with_storage_path(parent.path()),
        context,
        Arc::new(TemplateLocator::new([child.path(), parent.path()])),
        Arc::new(YamlFileLoader)
    )
    .unwrap();

    assert_eq!(
        mnemosyne.get_default("site_title"),
        Some(Value::from("My Theme"))
    );
}

#[test]
fn error_report_lists_handled_failures() {
    let theme = theme();
    let context = Arc::new(ProcessContext::new());
    let mnemosyne = Mnemosyne::with_context(
        Settings::default(),
        Arc::clone(&context),
        Arc::new(TemplateLocator::new([theme.path()])),
        Arc::new(YamlFileLoader)
    )
    .unwrap();

    assert_eq!(
        mnemosyne
            .remember(&Value::from(3), &Value::from("x"), None)
            .unwrap(),
        None
    );
    assert_eq!(
        mnemosyne
            .remember(&Value::from("site_title"), &Value::from(2.5), None)
            .unwrap(),
        None
    );

    let html = context.errors().render_html().unwrap();
    assert!(html.starts_with("<ul class=\"mns_error_report\">"));
    assert_eq!(html.matches("<li class=\"mns_error_description\">").count(), 2);
}

#[test]
#[serial]
fn global_context_is_shared_between_instances() {
    let theme = theme();
    ProcessContext::global().reset();

    let first = Mnemosyne::new(
        Settings::default(),
        Arc::new(TemplateLocator::new([theme.path()]))
    )
    .unwrap();
    assert_eq!(first.get_default("posts_per_page"), Some(Value::from(10)));

    fs::remove_file(theme.path().join("defaults.mnemosyne.yaml")).unwrap();

    let second = Mnemosyne::new(
        Settings::default().with_emit_exceptions(true),
        Arc::new(TemplateLocator::new([theme.path()]))
    )
    .unwrap();
    assert_eq!(second.get_default("posts_per_page"), Some(Value::from(10)));

    ProcessContext::global().reset();
}
