//! Icon loader
//!
//! Resolves registry entries to components through a [`ModuleImporter`],
//! memoizing every result. Concurrent loads of one name share a single
//! in-flight import. Failures never reach callers: they are logged and the
//! shared fallback component is cached in place of the icon.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::builtin;
use super::component::{fallback_icon, IconHandle};
use super::error::ImportError;
use super::importer::{ModuleImporter, VECTOR_EXPORT};
use super::registry::IconRegistry;
use super::types::{IconCategory, IconDefinition, IconKind};

/// Registry shared between a loader and whoever configures it
pub type SharedRegistry = Arc<RwLock<IconRegistry>>;

type LoadFuture = Shared<BoxFuture<'static, IconHandle>>;

/// Loader settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Names loaded when a context mounts
    pub preload_icons: Vec<String>,
    /// Upper bound on a single import; `None` waits indefinitely
    pub load_timeout: Option<Duration>,
}

/// Snapshot of loader occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub cached: usize,
    pub loading: usize,
    pub registry: usize,
}

struct LoaderInner {
    registry: SharedRegistry,
    importer: Arc<dyn ModuleImporter>,
    config: LoaderConfig,
    cache: DashMap<String, IconHandle>,
    loading: DashMap<String, LoadFuture>,
    /// Bumped on every cache clear; loads started earlier must not settle
    generation: AtomicU64,
}

impl LoaderInner {
    /// Record a finished load unless the cache was cleared since it started
    fn settle(&self, name: &str, generation: u64, icon: IconHandle) {
        if let Entry::Occupied(entry) = self.loading.entry(name.to_string()) {
            if self.generation.load(Ordering::SeqCst) == generation {
                self.cache.insert(name.to_string(), icon);
                drop(entry.remove());
            }
        }
    }
}

/// Lazy, de-duplicating icon loader
#[derive(Clone)]
pub struct IconLoader {
    inner: Arc<LoaderInner>,
}

impl std::fmt::Debug for IconLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconLoader")
            .field("importer", &self.inner.importer)
            .field("config", &self.inner.config)
            .field("stats", &self.get_cache_stats())
            .finish()
    }
}

impl IconLoader {
    pub fn new(
        registry: SharedRegistry,
        importer: Arc<dyn ModuleImporter>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                registry,
                importer,
                config,
                cache: DashMap::new(),
                loading: DashMap::new(),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Loader over the built-in registry and modules
    pub fn with_builtins(config: LoaderConfig) -> Self {
        Self::new(
            Arc::new(RwLock::new(IconRegistry::builtin())),
            Arc::new(builtin::builtin_importer()),
            config,
        )
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.inner.registry
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.inner.config
    }

    pub fn get_icon_definition(&self, name: &str) -> Option<IconDefinition> {
        self.inner.registry.read().get(name).cloned()
    }

    /// Whether a load for `name` has settled into the cache
    pub fn is_icon_loaded(&self, name: &str) -> bool {
        self.inner.cache.contains_key(name)
    }

    /// Resolve `name` to a component.
    ///
    /// Returns `None` only when the name is not registered. Import failures
    /// resolve to the fallback component.
    pub async fn load_icon(&self, name: &str) -> Option<IconHandle> {
        if let Some(icon) = self.inner.cache.get(name) {
            return Some(icon.clone());
        }

        let load = match self.inner.loading.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                // A load may have settled since the cache check
                if let Some(icon) = self.inner.cache.get(name) {
                    return Some(icon.clone());
                }

                let Some(definition) = self.get_icon_definition(name) else {
                    warn!("Icon \"{}\" not found in registry", name);
                    return None;
                };

                let load = self.start_load(name, definition);
                entry.insert(load.clone());
                load
            }
        };

        Some(load.await)
    }

    fn start_load(&self, name: &str, definition: IconDefinition) -> LoadFuture {
        let inner: Weak<LoaderInner> = Arc::downgrade(&self.inner);
        let importer = self.inner.importer.clone();
        let timeout = self.inner.config.load_timeout;
        let generation = self.inner.generation.load(Ordering::SeqCst);
        let name = name.to_string();

        debug!("Loading icon {} from {}", name, definition.import_path);

        async move {
            let icon = match import_component(importer.as_ref(), &definition, timeout).await {
                Ok(icon) => icon,
                Err(e) => {
                    error!("Failed to load icon \"{}\": {}", name, e);
                    fallback_icon()
                }
            };

            if let Some(inner) = inner.upgrade() {
                inner.settle(&name, generation, icon.clone());
            }
            icon
        }
        .boxed()
        .shared()
    }

    pub async fn preload_icon(&self, name: &str) {
        if self.load_icon(name).await.is_none() {
            warn!("Failed to preload icon \"{}\"", name);
        }
    }

    /// Load every name concurrently
    pub async fn preload_icons<S: AsRef<str>>(&self, names: &[S]) {
        join_all(names.iter().map(|name| self.preload_icon(name.as_ref()))).await;
    }

    pub fn get_available_icons(&self, category: Option<IconCategory>) -> Vec<String> {
        self.inner.registry.read().get_icon_names(category)
    }

    pub fn search_icons(&self, query: &str) -> Vec<IconDefinition> {
        self.inner
            .registry
            .read()
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Forget every cached and in-flight load
    pub fn clear_cache(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.loading.clear();
        self.inner.cache.clear();
        debug!("Icon cache cleared");
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        CacheStats {
            cached: self.inner.cache.len(),
            loading: self.inner.loading.len(),
            registry: self.inner.registry.read().len(),
        }
    }
}

/// Import a definition's module and pick the export its kind calls for
async fn import_component(
    importer: &dyn ModuleImporter,
    definition: &IconDefinition,
    timeout: Option<Duration>,
) -> Result<IconHandle, ImportError> {
    let export = match &definition.kind {
        IconKind::Svg => Some(VECTOR_EXPORT),
        IconKind::Tsx | IconKind::Mui => None,
        IconKind::Other(tag) => return Err(ImportError::UnsupportedKind(tag.clone())),
    };

    let path = &definition.import_path;
    let import = importer.import(path);
    let module = match timeout {
        Some(limit) => tokio::time::timeout(limit, import)
            .await
            .map_err(|_| ImportError::Timeout(path.clone()))??,
        None => import.await?,
    };

    let component = match export {
        Some(name) => module.export(name),
        None => module.default_export(),
    };

    component.cloned().ok_or_else(|| ImportError::MissingExport {
        path: path.clone(),
        export: export.unwrap_or("default"),
    })
}
