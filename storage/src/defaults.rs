//! # Defaults Store
//!
//! Lookup of defaults by key, backed by a mapping that is located, parsed and
//! cached once per process context.

use crate::context::ProcessContext;
use config::Settings;
use errors::MnemosyneError;
use mn_core::{
    DefaultsMapping, DefaultsProvider, FileLoader, FileLocator, LocateOutcome, Value
};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use utils::{is_valid_value, type_name};

/// Identifier of the process-cache slot holding the parsed defaults.
pub const DEFAULTS_CACHE_ID: &str = "mnemosyne_default_cache";

/// Where the defaults come from: the collaborators plus the configured file.
#[derive(Clone)]
pub struct DefaultsSource {
    locator: Arc<dyn FileLocator>,
    loader: Arc<dyn FileLoader>,
    storage_file: String,
    storage_path: Option<PathBuf>
}

impl DefaultsSource {
    pub fn new(
        locator: Arc<dyn FileLocator>,
        loader: Arc<dyn FileLoader>,
        settings: &Settings,
    ) -> Self {
        Self {
            locator,
            loader,
            storage_file: settings.storage_file.clone(),
            storage_path: settings.storage_path.clone()
        }
    }

    fn describe(&self) -> String {
        match &self.storage_path {
            Some(dir) => dir.join(&self.storage_file).display().to_string(),
            None => self.storage_file.clone()
        }
    }

    fn read(&self) -> Result<DefaultsMapping, MnemosyneError> {
        let path = match self
            .locator
            .locate(&self.storage_file, self.storage_path.as_deref())
        {
            LocateOutcome::Found(path) => path,
            LocateOutcome::NotFound => {
                return Err(MnemosyneError::StorageNotFound {
                    file: self.describe()
                });
            }
            LocateOutcome::Ambiguous(candidates) => {
                return Err(MnemosyneError::StorageAmbiguous {
                    file: self.describe(),
                    candidates
                });
            }
        };

        let mapping = self.loader.read_and_parse(&path)?;
        tracing::info!(
            path = %path.display(),
            entries = mapping.len(),
            "Loaded defaults file"
        );
        Ok(mapping)
    }
}

/// Read-only access to the defaults of one process context.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Owns the loaded `DefaultsMapping` and answers `get_default` lookups
/// against it. Construction does no I/O; the first lookup (or an explicit
/// [`DefaultsStore::load`]) reads the file unless the context already caches
/// it.
///
/// ## Caching
/// The parsed mapping is stored in the context's process cache under
/// [`DEFAULTS_CACHE_ID`]. First-time loads are serialised on the context's
/// load guard and re-check the cache, so concurrent callers converge on a
/// single read. The cache slot is shared by every store on the context,
/// whatever file each store is configured with.
///
/// ## Failure
/// Only the first load on a store reports a storage failure. After it the
/// store behaves as if the defaults were empty: every lookup misses.
pub struct DefaultsStore {
    context: Arc<ProcessContext>,
    source: DefaultsSource,
    loaded: OnceLock<Arc<DefaultsMapping>>
}

impl DefaultsStore {
    pub fn new(context: Arc<ProcessContext>, source: DefaultsSource) -> Self {
        Self {
            context,
            source,
            loaded: OnceLock::new()
        }
    }

    pub fn context(&self) -> &Arc<ProcessContext> {
        &self.context
    }

    /// Load the defaults, consulting the process cache first.
    pub fn load(&self) -> Result<Arc<DefaultsMapping>, MnemosyneError> {
        let mut failure = None;
        let mapping = self.loaded.get_or_init(|| {
            self.load_shared().unwrap_or_else(|err| {
                failure = Some(err);
                Arc::default()
            })
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(Arc::clone(mapping))
        }
    }

    fn load_shared(&self) -> Result<Arc<DefaultsMapping>, MnemosyneError> {
        let cache = self.context.cache();
        if let Some(mapping) = cache.get(DEFAULTS_CACHE_ID) {
            tracing::debug!(cache_hit = true, "defaults cache hit");
            return Ok(mapping);
        }

        let _guard = self.context.load_guard();
        if let Some(mapping) = cache.get(DEFAULTS_CACHE_ID) {
            tracing::debug!(cache_hit = true, "defaults loaded by a concurrent caller");
            return Ok(mapping);
        }

        let mapping = Arc::new(self.source.read()?);
        cache.set(DEFAULTS_CACHE_ID, Arc::clone(&mapping));
        Ok(mapping)
    }

    /// The loaded mapping, or an empty one when the defaults are unavailable.
    pub fn mapping(&self) -> Arc<DefaultsMapping> {
        match self.load() {
            Ok(mapping) => mapping,
            Err(err) => {
                tracing::warn!(error = %err, "Defaults unavailable; every lookup will miss");
                Arc::default()
            }
        }
    }

    /// Keys of the loaded defaults, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.mapping().keys().into_iter().map(str::to_string).collect()
    }
}

impl DefaultsProvider for DefaultsStore {
    fn get_default(&self, key: &str) -> Result<Value, MnemosyneError> {
        let mapping = self.mapping();
        match mapping.get(key) {
            None | Some(Value::Null) => Err(MnemosyneError::KeyNotFound {
                key: key.to_string()
            }),
            Some(value) if is_valid_value(value) => Ok(value.clone()),
            Some(value) => Err(MnemosyneError::InvalidDefaultType {
                key: key.to_string(),
                found: type_name(value).to_string()
            })
        }
    }
}
