//! Renderable icon components
//!
//! Every loaded icon is an [`IconHandle`]: a shared component that renders
//! itself to markup for a given set of [`IconProps`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::types::IconProps;

/// Something that renders to an icon
pub trait IconComponent: Send + Sync + fmt::Debug {
    fn render(&self, props: &IconProps) -> String;
}

/// Shared handle to a resolved component
pub type IconHandle = Arc<dyn IconComponent>;

static FALLBACK: Lazy<IconHandle> = Lazy::new(|| Arc::new(FallbackIcon));

/// The component substituted for every failed load.
///
/// Always the same allocation, so callers can detect it with [`is_fallback`].
pub fn fallback_icon() -> IconHandle {
    FALLBACK.clone()
}

pub fn is_fallback(icon: &IconHandle) -> bool {
    Arc::ptr_eq(icon, &FALLBACK)
}

/// Escape a value for use inside a double-quoted attribute
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn class_attr(props: &IconProps) -> String {
    format!(" class=\"{}\"", escape_attr(&props.class_name))
}

/// Inline vector icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgIcon {
    view_box: String,
    body: String,
}

impl SvgIcon {
    pub fn new(view_box: &str, body: &str) -> Self {
        Self {
            view_box: view_box.to_string(),
            body: body.to_string(),
        }
    }

    /// 24×24 icon from path data, filled with the render color
    pub fn from_paths(paths: &[&str]) -> Self {
        let body: String = paths
            .iter()
            .map(|d| format!("<path d=\"{}\" fill=\"currentColor\"/>", d))
            .collect();
        Self::new("0 0 24 24", &body)
    }

    /// Parse a standalone `<svg>` document.
    ///
    /// Keeps the root `viewBox` (24×24 when absent) and the inner markup.
    pub fn from_markup(markup: &str) -> Option<Self> {
        let start = markup.find("<svg")?;
        let open_end = start + markup[start..].find('>')?;
        let close = markup.rfind("</svg>")?;
        if close < open_end {
            return None;
        }

        let open_tag = &markup[start..open_end];
        let view_box = attribute(open_tag, "viewBox").unwrap_or("0 0 24 24");
        let body = markup[open_end + 1..close].trim();
        Some(Self::new(view_box, body))
    }

    pub fn view_box(&self) -> &str {
        &self.view_box
    }
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

impl IconComponent for SvgIcon {
    fn render(&self, props: &IconProps) -> String {
        format!(
            "<svg{} width=\"{}\" height=\"{}\" viewBox=\"{}\" fill=\"none\" style=\"color: {}\">{}</svg>",
            class_attr(props),
            escape_attr(props.width()),
            escape_attr(props.height()),
            escape_attr(&self.view_box),
            escape_attr(&props.color),
            self.body
        )
    }
}

/// Icon-font glyph rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphIcon {
    pub codepoint: char,
}

impl GlyphIcon {
    pub fn new(codepoint: char) -> Self {
        Self { codepoint }
    }
}

impl IconComponent for GlyphIcon {
    fn render(&self, props: &IconProps) -> String {
        let class = if props.class_name.is_empty() {
            "material-icons".to_string()
        } else {
            format!("material-icons {}", escape_attr(&props.class_name))
        };
        format!(
            "<span class=\"{}\" style=\"font-size: {}; color: {}\">&#x{:X};</span>",
            class,
            escape_attr(props.width()),
            escape_attr(&props.color),
            self.codepoint as u32
        )
    }
}

/// Generic "?" in a circle, shown when an icon cannot be loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackIcon;

impl IconComponent for FallbackIcon {
    fn render(&self, props: &IconProps) -> String {
        let color = escape_attr(&props.color);
        format!(
            "<svg role=\"img\"{} width=\"{}\" height=\"{}\" viewBox=\"0 0 24 24\" fill=\"{color}\">\
             <circle cx=\"12\" cy=\"12\" r=\"10\" stroke=\"{color}\" stroke-width=\"2\" fill=\"none\"/>\
             <text x=\"12\" y=\"16\" text-anchor=\"middle\" font-size=\"12\" fill=\"{color}\">?</text>\
             </svg>",
            class_attr(props),
            escape_attr(props.width()),
            escape_attr(props.height()),
        )
    }
}

/// Placeholder shown while an icon is loading
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingSkeleton;

impl IconComponent for LoadingSkeleton {
    fn render(&self, props: &IconProps) -> String {
        format!(
            "<div role=\"presentation\" class=\"icon-loading-skeleton {}\" \
             style=\"width: {}; height: {}; background-color: #e0e0e0; border-radius: 2px\"></div>",
            escape_attr(&props.class_name),
            escape_attr(props.width()),
            escape_attr(props.height()),
        )
    }
}

/// How a remote icon is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlIconKind {
    #[default]
    Svg,
    Image,
}

/// Icon served from a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlIcon {
    pub url: String,
    pub kind: UrlIconKind,
}

impl UrlIcon {
    pub fn new(url: &str, kind: UrlIconKind) -> Self {
        Self {
            url: url.to_string(),
            kind,
        }
    }
}

impl IconComponent for UrlIcon {
    fn render(&self, props: &IconProps) -> String {
        let url = escape_attr(&self.url);
        let width = escape_attr(props.width());
        let height = escape_attr(props.height());
        let color = escape_attr(&props.color);

        match self.kind {
            UrlIconKind::Image => format!(
                "<img src=\"{}\" alt=\"icon\"{} width=\"{}\" height=\"{}\" style=\"color: {}\"/>",
                url,
                class_attr(props),
                width,
                height,
                color
            ),
            // Fallback glyph shows when the object fails to load
            UrlIconKind::Svg => format!(
                "<object data=\"{}\" type=\"image/svg+xml\"{} width=\"{}\" height=\"{}\" style=\"color: {}\">{}</object>",
                url,
                class_attr(props),
                width,
                height,
                color,
                FallbackIcon.render(props)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_shared() {
        let a = fallback_icon();
        let b = fallback_icon();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(is_fallback(&a));

        let other: IconHandle = Arc::new(FallbackIcon);
        assert!(!is_fallback(&other));
    }

    #[test]
    fn test_fallback_render() {
        let html = fallback_icon().render(&IconProps::sized("16px").with_color("red"));
        assert!(html.starts_with("<svg role=\"img\""));
        assert!(html.contains("width=\"16px\""));
        assert!(html.contains("<circle"));
        assert!(html.contains(">?</text>"));
        assert!(html.contains("stroke=\"red\""));
    }

    #[test]
    fn test_skeleton_render() {
        let html = LoadingSkeleton.render(&IconProps::default().with_class("icon-svg"));
        assert!(html.contains("role=\"presentation\""));
        assert!(html.contains("class=\"icon-loading-skeleton icon-svg\""));
        assert!(html.contains("width: 24px; height: 24px"));
    }

    #[test]
    fn test_svg_from_paths() {
        let icon = SvgIcon::from_paths(&["M1 1h2", "M3 3h4"]);
        let html = icon.render(&IconProps::sized("32px").with_color("#ff0000"));

        assert_eq!(html.matches("<path").count(), 2);
        assert!(html.contains("viewBox=\"0 0 24 24\""));
        assert!(html.contains("width=\"32px\" height=\"32px\""));
        assert!(html.contains("style=\"color: #ff0000\""));
    }

    #[test]
    fn test_svg_from_markup() {
        let markup = r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 48 48"><rect width="4" height="4"/></svg>"#;
        let icon = SvgIcon::from_markup(markup).unwrap();
        assert_eq!(icon.view_box(), "0 0 48 48");
        assert!(icon.render(&IconProps::default()).contains("<rect width=\"4\" height=\"4\"/>"));

        let no_view_box = SvgIcon::from_markup("<svg><path d=\"M0\"/></svg>").unwrap();
        assert_eq!(no_view_box.view_box(), "0 0 24 24");

        assert!(SvgIcon::from_markup("not an svg").is_none());
        assert!(SvgIcon::from_markup("<svg viewBox=\"0 0 1 1\">").is_none());
    }

    #[test]
    fn test_props_are_escaped() {
        let props = IconProps::default().with_class("a\"b<c>");
        let html = FallbackIcon.render(&props);
        assert!(html.contains("class=\"a&quot;b&lt;c&gt;\""));
    }

    #[test]
    fn test_glyph_render() {
        let html = GlyphIcon::new('\u{E8B8}').render(&IconProps::sized("20px"));
        assert!(html.contains("class=\"material-icons\""));
        assert!(html.contains("&#xE8B8;"));
        assert!(html.contains("font-size: 20px"));
    }

    #[test]
    fn test_url_icon_render() {
        let svg = UrlIcon::new("https://cdn.test/a.svg", UrlIconKind::Svg).render(&IconProps::default());
        assert!(svg.starts_with("<object data=\"https://cdn.test/a.svg\" type=\"image/svg+xml\""));
        assert!(svg.contains("<circle"));

        let img = UrlIcon::new("https://cdn.test/a.png", UrlIconKind::Image).render(&IconProps::default());
        assert!(img.starts_with("<img src=\"https://cdn.test/a.png\" alt=\"icon\""));
        assert!(!img.contains("<circle"));
    }
}
