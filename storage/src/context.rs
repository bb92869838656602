//! Process-scoped state shared by every Mnemosyne instance.

use crate::error_log::ErrorLog;
use mn_core::{DefaultsMapping, ProcessCache};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// In-memory process cache.
///
/// Mappings are stored behind `Arc`, so a reader observes either no entry or
/// a complete mapping.
#[derive(Default)]
pub struct InMemoryProcessCache {
    slots: RwLock<HashMap<String, Arc<DefaultsMapping>>>
}

impl InMemoryProcessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl ProcessCache for InMemoryProcessCache {
    fn get(&self, id: &str) -> Option<Arc<DefaultsMapping>> {
        self.slots.read().get(id).cloned()
    }

    fn set(&self, id: &str, mapping: Arc<DefaultsMapping>) {
        self.slots.write().insert(id.to_string(), mapping);
    }

    fn clear(&self) {
        self.slots.write().clear();
    }
}

/// Process-wide context: the defaults cache, the diagnostic error list and
/// the guard serialising first-time loads.
///
/// Pass one context to every store that should share loaded defaults.
/// [`ProcessContext::global`] provides the context used when none is
/// injected.
pub struct ProcessContext {
    cache: Arc<dyn ProcessCache>,
    errors: ErrorLog,
    load_guard: Mutex<()>
}

static GLOBAL: OnceLock<Arc<ProcessContext>> = OnceLock::new();

impl ProcessContext {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(InMemoryProcessCache::new()))
    }

    pub fn with_cache(cache: Arc<dyn ProcessCache>) -> Self {
        Self {
            cache,
            errors: ErrorLog::new(),
            load_guard: Mutex::new(())
        }
    }

    /// The context shared by the whole process.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    pub fn cache(&self) -> &dyn ProcessCache {
        self.cache.as_ref()
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// Held while a store locates and parses the defaults file.
    pub(crate) fn load_guard(&self) -> MutexGuard<'_, ()> {
        self.load_guard.lock()
    }

    /// Forget cached defaults and recorded errors, as at the start of a new
    /// request in a request-scoped process.
    pub fn reset(&self) {
        self.cache.clear();
        self.errors.clear();
        tracing::debug!("Process context reset");
    }
}

impl Default for ProcessContext {
    fn default() -> Self {
        Self::new()
    }
}
