//! Color helpers for brand palettes
//!
//! Brand colors travel through the system as `#rrggbb` strings (that is how
//! they are stored in theme records). These helpers parse them into
//! [`Rgb8`] values, derive hover/pressed shades and pick readable text colors.

use palette::Srgb;

/// 8-bit sRGB color
pub type Rgb8 = Srgb<u8>;

/// Text color used on dark backgrounds
pub const LIGHT_TEXT: &str = "#ffffff";
/// Text color used on light backgrounds
pub const DARK_TEXT: &str = "#000000";

/// Brightness at or below which a color counts as dark (0-255 scale)
const DARK_BRIGHTNESS_THRESHOLD: f64 = 128.0;

/// Parse a `#rrggbb` (or `rrggbb`) hex string
pub fn hex_to_rgb(hex: &str) -> Option<Rgb8> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb8::new(r, g, b))
}

/// Format channels as a lowercase `#rrggbb` string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Format a parsed color as a lowercase `#rrggbb` string
pub fn color_to_hex(color: Rgb8) -> String {
    rgb_to_hex(color.red, color.green, color.blue)
}

/// Lighten (positive) or darken (negative) a hex color by a percentage.
///
/// Every channel moves by `round(2.55 * percent)` and is clamped to 0..=255.
/// Returns `None` when `color` is not a valid hex color.
pub fn adjust_color(color: &str, percent: f64) -> Option<String> {
    let rgb = hex_to_rgb(color)?;
    // Half-up rounding: -50% maps to -127
    let amount = (2.55 * percent + 0.5).floor() as i32;

    let shift = |channel: u8| (channel as i32 + amount).clamp(0, 255) as u8;
    Some(rgb_to_hex(shift(rgb.red), shift(rgb.green), shift(rgb.blue)))
}

/// Perceived brightness on a 0-255 scale (ITU-R BT.601 weights)
pub fn brightness(color: Rgb8) -> f64 {
    (color.red as f64 * 299.0 + color.green as f64 * 587.0 + color.blue as f64 * 114.0) / 1000.0
}

/// Whether a hex color is dark. Unparseable input is treated as black.
pub fn is_color_dark(color: &str) -> bool {
    let rgb = hex_to_rgb(color).unwrap_or_else(|| Rgb8::new(0, 0, 0));
    brightness(rgb) <= DARK_BRIGHTNESS_THRESHOLD
}

/// Pick white text for dark backgrounds and black text for light ones
pub fn contrast_text_color(background: &str) -> &'static str {
    if is_color_dark(background) {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}
