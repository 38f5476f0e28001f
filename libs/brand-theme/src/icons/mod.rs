//! Icon system
//!
//! Lazy, categorized icons:
//! - [`IconRegistry`]: name → definition table with aliases, search and validation
//! - [`IconLoader`]: imports and memoizes components, sharing in-flight loads
//! - [`IconView`] / [`Icon`]: per-icon render state machine and sized wrapper
//! - [`IconContext`]: ambient access to a loader plus mount-time preload
//!
//! Modules behind import paths come from a [`ModuleImporter`]. The built-in
//! table is served by [`builtin::builtin_importer`]; [`DirImporter`] reads
//! SVG files from disk.

pub mod builtin;
pub mod component;
pub mod context;
pub mod error;
pub mod importer;
pub mod loader;
pub mod provider;
pub mod registry;
pub mod types;

pub use component::{
    fallback_icon, is_fallback, FallbackIcon, GlyphIcon, IconComponent, IconHandle,
    LoadingSkeleton, SvgIcon, UrlIcon, UrlIconKind,
};
pub use context::IconContext;
pub use error::{IconError, ImportError};
pub use importer::{
    DirImporter, IconModule, ModuleImporter, RetryingImporter, StaticImporter, VECTOR_EXPORT,
};
pub use loader::{CacheStats, IconLoader, LoaderConfig, SharedRegistry};
pub use provider::{Icon, IconLoadStatus, IconState, IconView, Resolution, ResolveTicket};
pub use registry::{IconMap, IconRegistry, RegistryStats, ValidationReport};
pub use types::{IconCategory, IconDefinition, IconKind, IconProps, IconSize, IconVariant};
