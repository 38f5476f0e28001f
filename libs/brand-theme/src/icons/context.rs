//! Ambient icon context
//!
//! Bundles a loader with the operations views need, and runs the
//! configured preload when mounted.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::component::IconHandle;
use super::loader::IconLoader;
use super::provider::IconView;
use super::registry::IconMap;
use super::types::{IconCategory, IconProps};

/// Shared access to an [`IconLoader`]
#[derive(Debug, Clone)]
pub struct IconContext {
    loader: IconLoader,
    preload: Vec<String>,
}

impl IconContext {
    /// Context preloading the loader's configured names
    pub fn new(loader: IconLoader) -> Self {
        let preload = loader.config().preload_icons.clone();
        Self { loader, preload }
    }

    pub fn with_preload(mut self, names: Vec<String>) -> Self {
        self.preload = names;
        self
    }

    pub fn loader(&self) -> &IconLoader {
        &self.loader
    }

    /// Fire the preload in the background.
    ///
    /// Failures are logged by the loader. Returns `None` when nothing is
    /// configured.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        if self.preload.is_empty() {
            return None;
        }

        let loader = self.loader.clone();
        let names = self.preload.clone();
        info!("Preloading {} icons", names.len());

        Some(tokio::spawn(async move {
            loader.preload_icons(names.as_slice()).await;
            debug!("Icon preload finished: {:?}", loader.get_cache_stats());
        }))
    }

    /// Snapshot of the registry
    pub fn registry(&self) -> IconMap {
        self.loader.registry().read().get_all()
    }

    pub async fn load_icon(&self, name: &str) -> Option<IconHandle> {
        self.loader.load_icon(name).await
    }

    pub async fn preload_icon(&self, name: &str) {
        self.loader.preload_icon(name).await
    }

    pub fn is_icon_loaded(&self, name: &str) -> bool {
        self.loader.is_icon_loaded(name)
    }

    pub fn get_available_icons(&self, category: Option<IconCategory>) -> Vec<String> {
        self.loader.get_available_icons(category)
    }

    /// New view bound to this context's loader
    pub fn view(&self, name: &str, props: IconProps) -> IconView {
        IconView::new(self.loader.clone(), name, props)
    }
}
