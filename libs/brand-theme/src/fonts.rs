//! Typography helpers for brand font families
//!
//! A brand's `font_family` is a CSS font stack such as
//! `"Open Sans", Arial, sans-serif`. Only the first family is ever fetched;
//! the rest is the browser's fallback chain.

/// Families that ship with every platform and never need a web font request
pub const SYSTEM_FONTS: &[&str] = &["Arial", "Helvetica", "Georgia", "Times", "sans-serif", "serif"];

/// Weights requested when none are given
pub const DEFAULT_WEIGHTS: &[&str] = &["400", "500", "600"];

const GOOGLE_FONTS_CSS: &str = "https://fonts.googleapis.com/css2";

/// `font-display` strategy for web fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontDisplay {
    Auto,
    Block,
    #[default]
    Swap,
    Fallback,
    Optional,
}

impl FontDisplay {
    pub fn as_str(self) -> &'static str {
        match self {
            FontDisplay::Auto => "auto",
            FontDisplay::Block => "block",
            FontDisplay::Swap => "swap",
            FontDisplay::Fallback => "fallback",
            FontDisplay::Optional => "optional",
        }
    }
}

/// A parsed CSS font stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    stack: Vec<String>,
}

impl FontFamily {
    /// Parse a comma separated font stack, dropping quotes and empty entries
    pub fn parse(font_family: &str) -> Self {
        let stack = font_family
            .split(',')
            .map(|name| name.trim().replace(['\'', '"'], ""))
            .filter(|name| !name.is_empty())
            .collect();
        Self { stack }
    }

    /// First family in the stack (the one that gets loaded)
    pub fn primary(&self) -> Option<&str> {
        self.stack.first().map(String::as_str)
    }

    /// Full stack in declaration order
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Whether the primary family is a built-in system font
    pub fn is_system(&self) -> bool {
        self.primary().map(is_system_font).unwrap_or(true)
    }

    /// Web font stylesheet URL for the primary family, if it needs one
    pub fn stylesheet_url(&self, weights: &[&str], display: FontDisplay) -> Option<String> {
        let primary = self.primary()?;
        if is_system_font(primary) {
            return None;
        }
        Some(google_fonts_url(primary, weights, display))
    }
}

/// First family of a CSS font stack with quotes stripped
pub fn primary_family(font_family: &str) -> String {
    FontFamily::parse(font_family)
        .primary()
        .unwrap_or_default()
        .to_string()
}

/// Whether a single family name is a built-in system font
pub fn is_system_font(name: &str) -> bool {
    SYSTEM_FONTS.contains(&name)
}

/// Build a Google Fonts CSS2 URL for one family
pub fn google_fonts_url(family: &str, weights: &[&str], display: FontDisplay) -> String {
    let weights = if weights.is_empty() { DEFAULT_WEIGHTS } else { weights };
    format!(
        "{}?family={}:wght@{}&display={}",
        GOOGLE_FONTS_CSS,
        family.replace(' ', "+"),
        weights.join(";"),
        display.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_family_strips_quotes() {
        assert_eq!(primary_family("'Open Sans', Arial, sans-serif"), "Open Sans");
        assert_eq!(primary_family("\"Roboto\""), "Roboto");
    }

    #[test]
    fn test_primary_family_empty() {
        assert_eq!(primary_family(""), "");
        assert_eq!(primary_family(" , "), "");
    }

    #[test]
    fn test_parse_stack_order() {
        let family = FontFamily::parse("Roboto, Arial, sans-serif");
        assert_eq!(family.stack(), &["Roboto", "Arial", "sans-serif"]);
    }

    #[test]
    fn test_system_fonts() {
        assert!(is_system_font("Arial"));
        assert!(is_system_font("serif"));
        assert!(!is_system_font("Roboto"));
        assert!(FontFamily::parse("Georgia, serif").is_system());
        assert!(FontFamily::parse("").is_system());
    }

    #[test]
    fn test_google_fonts_url() {
        let url = google_fonts_url("Open Sans", &["400", "700"], FontDisplay::Swap);
        assert_eq!(
            url,
            "https://fonts.googleapis.com/css2?family=Open+Sans:wght@400;700&display=swap"
        );
    }

    #[test]
    fn test_google_fonts_url_default_weights() {
        let url = google_fonts_url("Lato", &[], FontDisplay::Optional);
        assert!(url.contains("wght@400;500;600"));
        assert!(url.ends_with("display=optional"));
    }

    #[test]
    fn test_stylesheet_url_skips_system_fonts() {
        let family = FontFamily::parse("Arial, sans-serif");
        assert!(family.stylesheet_url(DEFAULT_WEIGHTS, FontDisplay::default()).is_none());

        let family = FontFamily::parse("Roboto, Arial, sans-serif");
        let url = family.stylesheet_url(DEFAULT_WEIGHTS, FontDisplay::default()).unwrap();
        assert!(url.contains("family=Roboto:"));
    }
}
