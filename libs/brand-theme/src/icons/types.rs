//! Icon definition types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::IconError;

/// Fixed set of icon categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Business,
    Navigation,
    Actions,
    Alerts,
    Content,
    Menu,
    Social,
    File,
    Editor,
}

impl IconCategory {
    pub const ALL: [IconCategory; 9] = [
        IconCategory::Business,
        IconCategory::Navigation,
        IconCategory::Actions,
        IconCategory::Alerts,
        IconCategory::Content,
        IconCategory::Menu,
        IconCategory::Social,
        IconCategory::File,
        IconCategory::Editor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconCategory::Business => "business",
            IconCategory::Navigation => "navigation",
            IconCategory::Actions => "actions",
            IconCategory::Alerts => "alerts",
            IconCategory::Content => "content",
            IconCategory::Menu => "menu",
            IconCategory::Social => "social",
            IconCategory::File => "file",
            IconCategory::Editor => "editor",
        }
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconCategory {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| IconError::UnknownCategory(s.to_string()))
    }
}

/// How an icon's module is shaped, and therefore how it is imported
///
/// Unrecognized tags read from external data are kept in [`IconKind::Other`]
/// so registry validation can report them; they never load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconKind {
    /// Raw vector markup exposed as a named export
    Svg,
    /// Framework component exposed as the default export
    Tsx,
    /// Icon-library component exposed as the default export
    Mui,
    /// Anything else
    Other(String),
}

impl IconKind {
    pub fn as_str(&self) -> &str {
        match self {
            IconKind::Svg => "svg",
            IconKind::Tsx => "tsx",
            IconKind::Mui => "mui",
            IconKind::Other(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, IconKind::Other(_))
    }
}

impl From<String> for IconKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "svg" => IconKind::Svg,
            "tsx" => IconKind::Tsx,
            "mui" => IconKind::Mui,
            _ => IconKind::Other(tag),
        }
    }
}

impl From<&str> for IconKind {
    fn from(tag: &str) -> Self {
        IconKind::from(tag.to_string())
    }
}

impl From<IconKind> for String {
    fn from(kind: IconKind) -> Self {
        match kind {
            IconKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDefinition {
    /// Unique name; must match the registry key
    pub name: String,
    pub category: IconCategory,
    /// Module locator handed to the importer
    pub import_path: String,
    #[serde(rename = "type")]
    pub kind: IconKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl IconDefinition {
    pub fn new(
        name: &str,
        category: IconCategory,
        import_path: &str,
        kind: impl Into<IconKind>,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            import_path: import_path.to_string(),
            kind: kind.into(),
            keywords: Vec::new(),
            deprecated: false,
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Case-insensitive match of an already lowercased query against
    /// the name, any keyword or the category
    pub(crate) fn matches(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(lowercase_query))
            || self.category.as_str().contains(lowercase_query)
    }
}

/// Named icon sizes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    /// Any CSS length
    Custom(String),
}

impl IconSize {
    /// CSS length for this size
    pub fn resolve(&self) -> &str {
        match self {
            IconSize::Sm => "16px",
            IconSize::Md => "20px",
            IconSize::Lg => "24px",
            IconSize::Xl => "32px",
            IconSize::Custom(size) => size,
        }
    }

    /// Name of a predefined size
    pub fn name(&self) -> Option<&'static str> {
        match self {
            IconSize::Sm => Some("sm"),
            IconSize::Md => Some("md"),
            IconSize::Lg => Some("lg"),
            IconSize::Xl => Some("xl"),
            IconSize::Custom(_) => None,
        }
    }
}

impl From<&str> for IconSize {
    fn from(size: &str) -> Self {
        match size {
            "sm" => IconSize::Sm,
            "md" => IconSize::Md,
            "lg" => IconSize::Lg,
            "xl" => IconSize::Xl,
            other => IconSize::Custom(other.to_string()),
        }
    }
}

/// Visual variant class applied by the icon wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconVariant {
    #[default]
    Outlined,
    Filled,
    Rounded,
    Sharp,
}

impl IconVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            IconVariant::Outlined => "outlined",
            IconVariant::Filled => "filled",
            IconVariant::Rounded => "rounded",
            IconVariant::Sharp => "sharp",
        }
    }
}

/// Render properties forwarded to icon components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconProps {
    /// CSS length used for both dimensions unless overridden
    pub size: String,
    pub color: String,
    pub class_name: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            size: "24px".to_string(),
            color: "currentColor".to_string(),
            class_name: String::new(),
            width: None,
            height: None,
        }
    }
}

impl IconProps {
    pub fn sized(size: &str) -> Self {
        Self {
            size: size.to_string(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn width(&self) -> &str {
        self.width.as_deref().unwrap_or(&self.size)
    }

    pub fn height(&self) -> &str {
        self.height.as_deref().unwrap_or(&self.size)
    }
}
