//! Icon rendering provider
//!
//! [`IconView`] tracks the load state of one named icon and renders the
//! matching markup: a skeleton while loading, the component once resolved,
//! the fallback glyph on error. Loads run outside the view through a
//! [`ResolveTicket`]; results for an outdated name or an unmounted view are
//! discarded when applied.

use serde::Serialize;
use tracing::{debug, warn};

use super::component::{escape_attr, fallback_icon, IconComponent, IconHandle, LoadingSkeleton};
use super::loader::IconLoader;
use super::types::{IconCategory, IconProps, IconSize, IconVariant};

/// Load state of a view
#[derive(Debug, Clone, Default)]
pub enum IconState {
    #[default]
    Idle,
    Loading,
    /// Resolved by a fresh load
    Loaded(IconHandle),
    /// Resolved from the loader cache
    Cached(IconHandle),
    Error,
    Unmounted,
}

/// Payload-free view of [`IconState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconLoadStatus {
    Idle,
    Loading,
    Loaded,
    Cached,
    Error,
    Unmounted,
}

impl IconState {
    pub fn status(&self) -> IconLoadStatus {
        match self {
            IconState::Idle => IconLoadStatus::Idle,
            IconState::Loading => IconLoadStatus::Loading,
            IconState::Loaded(_) => IconLoadStatus::Loaded,
            IconState::Cached(_) => IconLoadStatus::Cached,
            IconState::Error => IconLoadStatus::Error,
            IconState::Unmounted => IconLoadStatus::Unmounted,
        }
    }
}

/// A pending load for one view
#[derive(Debug)]
pub struct ResolveTicket {
    loader: IconLoader,
    name: String,
    epoch: u64,
    cached: bool,
}

/// Outcome of a [`ResolveTicket`], applied back to its view
#[derive(Debug)]
pub struct Resolution {
    epoch: u64,
    state: IconState,
}

impl ResolveTicket {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn resolve(self) -> Resolution {
        let state = match self.loader.load_icon(&self.name).await {
            Some(icon) if self.cached => IconState::Cached(icon),
            Some(icon) => IconState::Loaded(icon),
            None => IconState::Error,
        };
        Resolution {
            epoch: self.epoch,
            state,
        }
    }
}

/// Stateful renderer for a single named icon
#[derive(Debug)]
pub struct IconView {
    loader: IconLoader,
    name: String,
    props: IconProps,
    state: IconState,
    /// Incremented on every name change
    epoch: u64,
}

impl IconView {
    pub fn new(loader: IconLoader, name: &str, props: IconProps) -> Self {
        Self {
            loader,
            name: name.to_string(),
            props,
            state: IconState::Idle,
            epoch: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &IconState {
        &self.state
    }

    pub fn status(&self) -> IconLoadStatus {
        self.state.status()
    }

    pub fn set_props(&mut self, props: IconProps) {
        self.props = props;
    }

    /// Switch to another icon, restarting the cycle
    pub fn set_name(&mut self, name: &str) {
        if matches!(self.state, IconState::Unmounted) || self.name == name {
            return;
        }
        self.name = name.to_string();
        self.epoch += 1;
        self.state = IconState::Idle;
    }

    /// Start loading the current name.
    ///
    /// Returns `None` once unmounted or while no name is set.
    pub fn begin(&mut self) -> Option<ResolveTicket> {
        if matches!(self.state, IconState::Unmounted) {
            return None;
        }
        if self.name.is_empty() {
            self.state = IconState::Idle;
            return None;
        }

        let cached = self.loader.is_icon_loaded(&self.name);
        if !cached {
            self.state = IconState::Loading;
        }

        Some(ResolveTicket {
            loader: self.loader.clone(),
            name: self.name.clone(),
            epoch: self.epoch,
            cached,
        })
    }

    /// Apply a finished load. Returns `false` when the result was discarded.
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        if matches!(self.state, IconState::Unmounted) || resolution.epoch != self.epoch {
            debug!("Discarding stale icon result for {}", self.name);
            return false;
        }
        self.state = resolution.state;
        true
    }

    /// Load the current name in place
    pub async fn refresh(&mut self) -> IconLoadStatus {
        if let Some(ticket) = self.begin() {
            let resolution = ticket.resolve().await;
            self.apply(resolution);
        }
        self.status()
    }

    pub fn unmount(&mut self) {
        self.state = IconState::Unmounted;
    }

    pub fn render(&self) -> String {
        match &self.state {
            IconState::Idle | IconState::Loading => LoadingSkeleton.render(&self.props),
            IconState::Error => fallback_icon().render(&self.props),
            IconState::Loaded(icon) | IconState::Cached(icon) => icon.render(&self.props),
            IconState::Unmounted => String::new(),
        }
    }
}

/// Sized, classed wrapper around an [`IconView`]
#[derive(Debug, Clone, Default)]
pub struct Icon {
    pub name: String,
    pub size: IconSize,
    pub color: Option<String>,
    pub variant: IconVariant,
    pub category: Option<IconCategory>,
    pub class_name: Option<String>,
}

impl Icon {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: impl Into<IconSize>) -> Self {
        self.size = size.into();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn variant(mut self, variant: IconVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn category(mut self, category: IconCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or("currentColor")
    }

    /// Container class list
    pub fn classes(&self) -> String {
        let mut classes = vec!["icon-container".to_string()];
        if let Some(class_name) = self.class_name.as_deref().filter(|c| !c.is_empty()) {
            classes.push(class_name.to_string());
        }
        classes.push(format!("icon-{}", self.variant.as_str()));
        if let Some(category) = self.category {
            classes.push(format!("icon-{}", category));
        }
        if let Some(size) = self.size.name() {
            classes.push(format!("icon-size-{}", size));
        }
        classes.join(" ")
    }

    /// Provider view for the inner icon
    pub fn view(&self, loader: &IconLoader) -> IconView {
        let props = IconProps::sized(self.size.resolve())
            .with_color(self.color_or_default())
            .with_class("icon-svg");
        IconView::new(loader.clone(), &self.name, props)
    }

    /// Load and render. An empty name renders nothing.
    pub async fn render(&self, loader: &IconLoader) -> String {
        if self.name.is_empty() {
            warn!("Icon component requires a name");
            return String::new();
        }

        let mut view = self.view(loader);
        view.refresh().await;

        let size = escape_attr(self.size.resolve());
        format!(
            "<span class=\"{}\" style=\"display: inline-flex; align-items: center; justify-content: center; width: {size}; height: {size}; color: {}\">{}</span>",
            escape_attr(&self.classes()),
            escape_attr(self.color_or_default()),
            view.render()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::loader::LoaderConfig;

    fn loader() -> IconLoader {
        IconLoader::with_builtins(LoaderConfig::default())
    }

    #[tokio::test]
    async fn test_view_lifecycle() {
        let mut view = IconView::new(loader(), "folder", IconProps::default());
        assert_eq!(view.status(), IconLoadStatus::Idle);
        assert!(view.render().contains("icon-loading-skeleton"));

        let ticket = view.begin().unwrap();
        assert_eq!(view.status(), IconLoadStatus::Loading);

        assert!(view.apply(ticket.resolve().await));
        assert_eq!(view.status(), IconLoadStatus::Loaded);
        assert!(view.render().contains("M10 4H4"));
    }

    #[tokio::test]
    async fn test_view_uses_cache() {
        let loader = loader();
        loader.preload_icon("folder").await;

        let mut view = IconView::new(loader, "folder", IconProps::default());
        let ticket = view.begin().unwrap();
        // Cached names skip the loading state
        assert_eq!(view.status(), IconLoadStatus::Idle);
        view.apply(ticket.resolve().await);
        assert_eq!(view.status(), IconLoadStatus::Cached);
    }

    #[tokio::test]
    async fn test_unknown_name_renders_fallback() {
        let mut view = IconView::new(loader(), "nope", IconProps::default());
        assert_eq!(view.refresh().await, IconLoadStatus::Error);
        assert!(view.render().contains(">?</text>"));
    }

    #[tokio::test]
    async fn test_result_after_name_change_is_discarded() {
        let mut view = IconView::new(loader(), "folder", IconProps::default());
        let ticket = view.begin().unwrap();

        view.set_name("info");
        assert_eq!(view.status(), IconLoadStatus::Idle);
        assert!(!view.apply(ticket.resolve().await));
        assert_eq!(view.status(), IconLoadStatus::Idle);

        assert_eq!(view.refresh().await, IconLoadStatus::Loaded);
        assert_eq!(view.name(), "info");
    }

    #[tokio::test]
    async fn test_result_after_unmount_is_discarded() {
        let mut view = IconView::new(loader(), "folder", IconProps::default());
        let ticket = view.begin().unwrap();

        view.unmount();
        assert!(!view.apply(ticket.resolve().await));
        assert_eq!(view.status(), IconLoadStatus::Unmounted);
        assert!(view.render().is_empty());
        assert!(view.begin().is_none());
    }

    #[tokio::test]
    async fn test_empty_name_stays_idle() {
        let mut view = IconView::new(loader(), "", IconProps::default());
        assert!(view.begin().is_none());
        assert_eq!(view.refresh().await, IconLoadStatus::Idle);
    }

    #[test]
    fn test_icon_classes() {
        let icon = Icon::new("business")
            .size("lg")
            .category(IconCategory::Business)
            .class("extra");
        assert_eq!(
            icon.classes(),
            "icon-container extra icon-outlined icon-business icon-size-lg"
        );

        let custom = Icon::new("business").size("3em").variant(IconVariant::Filled);
        assert_eq!(custom.classes(), "icon-container icon-filled");
    }

    #[tokio::test]
    async fn test_icon_render() {
        let html = Icon::new("warning").size("xl").color("#f00").render(&loader()).await;

        assert!(html.starts_with("<span class=\"icon-container icon-outlined icon-size-xl\""));
        assert!(html.contains("width: 32px; height: 32px; color: #f00"));
        assert!(html.contains("class=\"icon-svg\""));
        assert!(html.contains("M1 21h22L12 2 1 21z"));
    }

    #[tokio::test]
    async fn test_icon_without_name_renders_nothing() {
        assert!(Icon::new("").render(&loader()).await.is_empty());
    }
}
