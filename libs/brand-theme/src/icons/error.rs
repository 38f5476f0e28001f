//! Error types for icon registration and loading

use thiserror::Error;

/// Registry configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconError {
    /// Alias target is not registered
    #[error("Cannot create alias: target icon \"{0}\" does not exist")]
    AliasTargetMissing(String),

    /// Category name outside the fixed set
    #[error("Unknown icon category: {0}")]
    UnknownCategory(String),
}

/// Failures while importing an icon module.
///
/// These never reach loader callers; the loader logs them and substitutes the
/// fallback icon.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Nothing is available at the import path
    #[error("Module not found: {0}")]
    NotFound(String),

    /// Import path escapes the icon root or is otherwise unusable
    #[error("Invalid import path: {0}")]
    InvalidPath(String),

    /// Module loaded but lacks the export required by the icon type
    #[error("Module {path} does not have {export} export")]
    MissingExport { path: String, export: &'static str },

    /// Icon type has no import strategy
    #[error("Unsupported icon type: {0}")]
    UnsupportedKind(String),

    /// Import did not settle in time
    #[error("Import of {0} timed out")]
    Timeout(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Importer-specific failure
    #[error("Import failed: {0}")]
    Failed(String),
}
