//! # Brand Theme
//!
//! Branding and theming library for company-branded UI surfaces.
//!
//! This library provides:
//! - The branding settings model with defaults merged in on load
//! - Color helpers (hex adjust, contrast text, RGB conversion)
//! - Font family helpers (system font detection, web font URLs)
//! - A lazy icon loading system (registry, loader, provider, context)
//! - Local persistence of the active branding and a client for the theme service

pub mod branding;
pub mod client;
pub mod colors;
pub mod fonts;
pub mod icons;
pub mod storage;

pub use branding::{BrandingSettings, ButtonColors, Capabilities, Logos, ThemeSettings};
pub use client::{ClientError, ThemeClient, ThemeResponse};
pub use colors::{adjust_color, contrast_text_color, hex_to_rgb, is_color_dark, rgb_to_hex};
pub use fonts::FontFamily;
pub use icons::{
    IconCategory, IconContext, IconDefinition, IconError, IconHandle, IconKind, IconLoader,
    IconProps, IconRegistry, IconView, ImportError, LoaderConfig,
};
pub use storage::{BrandingStorage, StorageError};
