//! Branding settings
//!
//! The branding document describes a company's visual identity. It is the
//! payload of a stored theme record and of the local branding store. Every
//! field has a default, so a partial document always deserializes into a
//! complete one.

use serde::{Deserialize, Serialize};

use crate::colors::adjust_color;

/// Percentage applied to the primary color to derive the button hover shade
pub const HOVER_ADJUST_PERCENT: f64 = -20.0;

/// Complete branding configuration for one company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingSettings {
    /// Record id when the settings came from the theme service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning organization, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Company display name
    pub company_name: String,
    /// Company website
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    /// Colors, typography and logos
    pub theme: ThemeSettings,
    /// Product capabilities surfaced in the UI
    pub capabilities: Capabilities,
}

/// Theme portion of the branding document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Primary brand color (main CTA buttons, links)
    pub theme_color: String,
    /// Darker shade for hover states
    pub primary_dark_color: String,
    /// Accent color (borders, highlights, subtle backgrounds)
    pub extra_light_color: String,
    /// Main text color
    pub text_color: String,
    /// CSS font stack for all text
    pub font_family: String,
    /// Button palette
    pub button: ButtonColors,
    /// Logo assets
    pub logos: Logos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonColors {
    pub primary_color: String,
    pub secondary_color: String,
    pub hover_color: String,
    pub border_color: String,
}

/// Logo assets, usually `data:` URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Logos {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_logo_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub general_app_title: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            theme_color: "#1976d2".to_string(),
            primary_dark_color: "#1565c0".to_string(),
            extra_light_color: "#bbdefb".to_string(),
            text_color: "#000000".to_string(),
            font_family: "Roboto, Arial, sans-serif".to_string(),
            button: ButtonColors::default(),
            logos: Logos::default(),
        }
    }
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            primary_color: "#1976d2".to_string(),
            secondary_color: "#9c27b0".to_string(),
            hover_color: "#1565c0".to_string(),
            border_color: "#cccccc".to_string(),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            general_app_title: "My Bank".to_string(),
        }
    }
}

impl BrandingSettings {
    /// Set the company name
    pub fn with_company_name(mut self, name: &str) -> Self {
        self.company_name = name.to_string();
        self
    }

    /// Set the company website
    pub fn with_company_url(mut self, url: &str) -> Self {
        self.company_url = Some(url.to_string());
        self
    }

    /// Set the primary color.
    ///
    /// The primary button follows the primary color and the hover color is
    /// derived from it. An unparseable color leaves the hover shade untouched.
    pub fn with_primary_color(mut self, hex: &str) -> Self {
        self.theme.theme_color = hex.to_string();
        self.theme.button.primary_color = hex.to_string();
        if let Some(hover) = adjust_color(hex, HOVER_ADJUST_PERCENT) {
            self.theme.button.hover_color = hover;
        }
        self
    }

    /// Set the secondary button color
    pub fn with_secondary_color(mut self, hex: &str) -> Self {
        self.theme.button.secondary_color = hex.to_string();
        self
    }

    /// Set the font stack
    pub fn with_font_family(mut self, font_family: &str) -> Self {
        self.theme.font_family = font_family.to_string();
        self
    }

    /// Set the website logo (and optionally its display height)
    pub fn with_website_logo(mut self, data_url: String, height: Option<String>) -> Self {
        self.theme.logos.website_logo = Some(data_url);
        self.theme.logos.website_logo_height = height;
        self
    }

    /// Title shown in the app header, falling back to the company name
    pub fn display_title(&self) -> &str {
        if self.capabilities.general_app_title.is_empty() {
            &self.company_name
        } else {
            &self.capabilities.general_app_title
        }
    }

    /// Export as pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Import from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
