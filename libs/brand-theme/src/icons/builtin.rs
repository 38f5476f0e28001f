//! Built-in icon table
//!
//! The default registry entries and the module table that backs them. Vector
//! path data is Material Design; icon-library glyphs are Material Icons font
//! codepoints exposed under `material:<ligature>` import paths.

use std::sync::Arc;

use super::component::{GlyphIcon, SvgIcon};
use super::importer::{IconModule, StaticImporter};
use super::types::{IconCategory, IconDefinition, IconKind};

/// Import path prefix for icon-font glyph modules
pub const MATERIAL_PREFIX: &str = "material:";

struct Builtin {
    name: &'static str,
    category: IconCategory,
    import_path: &'static str,
    keywords: &'static [&'static str],
    paths: &'static [&'static str],
}

const BUILTIN_ICONS: &[Builtin] = &[
    // Business & office
    Builtin {
        name: "business",
        category: IconCategory::Business,
        import_path: "@/components/icons/BusinessIcon",
        keywords: &["office", "work", "company", "building"],
        paths: &["M12 7V3H2v18h20V7H12zM6 19H4v-2h2v2zm0-4H4v-2h2v2zm0-4H4V9h2v2zm0-4H4V5h2v2zm4 12H8v-2h2v2zm0-4H8v-2h2v2zm0-4H8V9h2v2zm0-4H8V5h2v2zm10 12h-8v-2h2v-2h-2v-2h2v-2h-2V9h8v10zm-2-8h-2v2h2v-2zm0 4h-2v2h2v-2z"],
    },
    // Actions & UI
    Builtin {
        name: "upload",
        category: IconCategory::Actions,
        import_path: "@/components/icons/UploadIcon",
        keywords: &["file", "transfer", "import", "add"],
        paths: &[
            "M14,2H6A2,2 0 0,0 4,4V20A2,2 0 0,0 6,22H18A2,2 0 0,0 20,20V8L14,2M18,20H6V4H13V9H18V20Z",
            "M12,11L16,15H13V19H11V15H8L12,11Z",
        ],
    },
    // Content & media
    Builtin {
        name: "color-lens",
        category: IconCategory::Content,
        import_path: "@/components/icons/ColorLensIcon",
        keywords: &["color", "paint", "design", "theme", "palette"],
        paths: &["M12 3c-4.97 0-9 4.03-9 9s4.03 9 9 9c.83 0 1.5-.67 1.5-1.5 0-.39-.15-.74-.39-1.01-.23-.26-.38-.61-.38-.99 0-.83.67-1.5 1.5-1.5H16c2.76 0 5-2.24 5-5 0-4.42-4.03-8-9-8zm-5.5 9c-.83 0-1.5-.67-1.5-1.5S5.67 9 6.5 9 8 9.67 8 10.5 7.33 12 6.5 12zm3-4C8.67 8 8 7.33 8 6.5S8.67 5 9.5 5s1.5.67 1.5 1.5S10.33 8 9.5 8zm5 0c-.83 0-1.5-.67-1.5-1.5S13.67 5 14.5 5s1.5.67 1.5 1.5S15.33 8 14.5 8zm3 4c-.83 0-1.5-.67-1.5-1.5S16.67 9 17.5 9s1.5.67 1.5 1.5-.67 1.5-1.5 1.5z"],
    },
    Builtin {
        name: "preview",
        category: IconCategory::Content,
        import_path: "@/components/icons/PreviewIcon",
        keywords: &["view", "eye", "show", "display"],
        paths: &["M12 4.5C7 4.5 2.73 7.61 1 12c1.73 4.39 6 7.5 11 7.5s9.27-3.11 11-7.5c-1.73-4.39-6-7.5-11-7.5zM12 17c-2.76 0-5-2.24-5-5s2.24-5 5-5 5 2.24 5 5-2.24 5-5 5zm0-8c-1.66 0-3 1.34-3 3s1.34 3 3 3 3-1.34 3-3-1.34-3-3-3z"],
    },
    // Navigation & menu
    Builtin {
        name: "dashboard",
        category: IconCategory::Navigation,
        import_path: "@/assets/icons/dashboard",
        keywords: &["home", "overview", "main", "start"],
        paths: &["M3 13h8V3H3v10zm0 8h8v-6H3v6zm10 0h8V11h-8v10zm0-18v6h8V3h-8z"],
    },
    Builtin {
        name: "settings",
        category: IconCategory::Navigation,
        import_path: "@/assets/icons/settings",
        keywords: &["configuration", "preferences", "options", "gear"],
        paths: &["M19.14 12.94c.04-.3.06-.61.06-.94 0-.32-.02-.64-.07-.94l2.03-1.58c.18-.14.23-.41.12-.61l-1.92-3.32c-.12-.22-.37-.29-.59-.22l-2.39.96c-.5-.38-1.03-.7-1.62-.94l-.36-2.54c-.04-.24-.24-.41-.48-.41h-3.84c-.24 0-.43.17-.47.41l-.36 2.54c-.59.24-1.13.57-1.62.94l-2.39-.96c-.22-.08-.47 0-.59.22L2.74 8.87c-.12.21-.08.47.12.61l2.03 1.58c-.05.3-.09.63-.09.94s.02.64.07.94l-2.03 1.58c-.18.14-.23.41-.12.61l1.92 3.32c.12.22.37.29.59.22l2.39-.96c.5.38 1.03.7 1.62.94l.36 2.54c.05.24.24.41.48.41h3.84c.24 0 .44-.17.47-.41l.36-2.54c.59-.24 1.13-.56 1.62-.94l2.39.96c.22.08.47 0 .59-.22l1.92-3.32c.12-.22.07-.47-.12-.61l-2.01-1.58zM12 15.6c-1.98 0-3.6-1.62-3.6-3.6s1.62-3.6 3.6-3.6 3.6 1.62 3.6 3.6-1.62 3.6-3.6 3.6z"],
    },
    // File operations
    Builtin {
        name: "folder",
        category: IconCategory::File,
        import_path: "@/assets/icons/folder",
        keywords: &["directory", "storage", "organize"],
        paths: &["M10 4H4c-1.11 0-2 .89-2 2v12c0 1.11.89 2 2 2h16c1.11 0 2-.89 2-2V8c0-1.11-.89-2-2-2h-8l-2-2z"],
    },
    // Alerts & status
    Builtin {
        name: "error",
        category: IconCategory::Alerts,
        import_path: "@/assets/icons/error",
        keywords: &["warning", "danger", "problem", "issue"],
        paths: &["M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm1 15h-2v-2h2v2zm0-4h-2V7h2v6z"],
    },
    Builtin {
        name: "success",
        category: IconCategory::Alerts,
        import_path: "@/assets/icons/success",
        keywords: &["check", "done", "complete", "ok"],
        paths: &["M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm-2 15l-5-5 1.41-1.41L10 14.17l7.59-7.59L19 8l-9 9z"],
    },
    Builtin {
        name: "info",
        category: IconCategory::Alerts,
        import_path: "@/assets/icons/info",
        keywords: &["information", "help", "about"],
        paths: &["M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm1 15h-2v-6h2v6zm0-8h-2V7h2v2z"],
    },
    Builtin {
        name: "warning",
        category: IconCategory::Alerts,
        import_path: "@/assets/icons/warning",
        keywords: &["caution", "alert", "attention"],
        paths: &["M1 21h22L12 2 1 21zm12-3h-2v-2h2v2zm0-4h-2v-4h2v4z"],
    },
];

/// Material Icons ligature → codepoint
const MATERIAL_GLYPHS: &[(&str, char)] = &[
    // System
    ("dashboard", '\u{E871}'),
    ("apps", '\u{E5C3}'),
    ("search", '\u{E8B6}'),
    ("settings", '\u{E8B8}'),
    ("lock", '\u{E897}'),
    ("person", '\u{E853}'),
    ("menu", '\u{E5D2}'),
    ("more_vert", '\u{E5D4}'),
    // Navigation
    ("arrow_back", '\u{E5C4}'),
    ("arrow_forward", '\u{E5C8}'),
    ("home", '\u{E88A}'),
    ("close", '\u{E5CD}'),
    ("expand_more", '\u{E5CE}'),
    ("expand_less", '\u{E5CF}'),
    // Actions
    ("add", '\u{E145}'),
    ("remove", '\u{E15B}'),
    ("edit", '\u{E3C9}'),
    ("delete", '\u{E872}'),
    ("content_copy", '\u{E14D}'),
    ("content_paste", '\u{E14F}'),
    ("undo", '\u{E166}'),
    ("redo", '\u{E15A}'),
    ("save", '\u{E161}'),
    ("share", '\u{E80D}'),
    ("file_download", '\u{E2C4}'),
    ("file_upload", '\u{E2C6}'),
    ("refresh", '\u{E5D5}'),
    ("send", '\u{E163}'),
    ("star", '\u{E838}'),
    // Content & status
    ("business", '\u{E0AF}'),
    ("palette", '\u{E40A}'),
    ("visibility", '\u{E8F4}'),
    ("folder", '\u{E2C7}'),
    ("error", '\u{E000}'),
    ("warning", '\u{E002}'),
    ("info", '\u{E88E}'),
    ("check_circle", '\u{E86C}'),
];

/// Definitions for the default registry
pub fn definitions() -> Vec<IconDefinition> {
    BUILTIN_ICONS
        .iter()
        .map(|icon| {
            IconDefinition::new(icon.name, icon.category, icon.import_path, IconKind::Tsx)
                .with_keywords(icon.keywords)
        })
        .collect()
}

/// Codepoint for a Material Icons ligature
pub fn material_glyph(ligature: &str) -> Option<char> {
    MATERIAL_GLYPHS
        .iter()
        .find(|(name, _)| *name == ligature)
        .map(|(_, codepoint)| *codepoint)
}

/// Importer serving every built-in module.
///
/// Built-in vector icons are default exports; glyphs live under
/// `material:<ligature>`.
pub fn builtin_importer() -> StaticImporter {
    let mut importer = StaticImporter::new();

    for icon in BUILTIN_ICONS {
        let component = Arc::new(SvgIcon::from_paths(icon.paths));
        importer.insert(icon.import_path, IconModule::new().with_default(component));
    }

    for (ligature, codepoint) in MATERIAL_GLYPHS {
        let component = Arc::new(GlyphIcon::new(*codepoint));
        importer.insert(
            &format!("{}{}", MATERIAL_PREFIX, ligature),
            IconModule::new().with_default(component),
        );
    }

    importer
}
