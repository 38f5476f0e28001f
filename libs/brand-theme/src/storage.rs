//! Local branding storage
//!
//! Persists the active branding document as a JSON file so it survives
//! restarts when the theme service is unreachable.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::branding::BrandingSettings;

/// File name of the stored branding document
pub const STORAGE_FILE: &str = "branding_settings.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No data directory available")]
    NoDataDir,
}

/// JSON file backed store for the active branding
#[derive(Debug, Clone)]
pub struct BrandingStorage {
    path: PathBuf,
}

impl BrandingStorage {
    /// Store inside `dir`
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(STORAGE_FILE),
        }
    }

    /// Store in the platform data directory (`<data>/brand-theme`)
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("brand-theme");
        Ok(Self::new(&dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save settings, creating the directory if needed
    pub fn save(&self, settings: &BrandingSettings) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(settings)?;
        std::fs::write(&self.path, content).map_err(|e| {
            error!("Failed to save branding settings: {}", e);
            StorageError::from(e)
        })?;
        info!("Branding settings saved to {:?}", self.path);
        Ok(())
    }

    /// Load stored settings.
    ///
    /// Missing or unreadable documents yield `None`; corruption is logged.
    pub fn load(&self) -> Option<BrandingSettings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                error!("Failed to load branding settings: {}", e);
                return None;
            }
        };

        match BrandingSettings::from_json(&content) {
            Ok(settings) => {
                debug!("Branding settings loaded from {:?}", self.path);
                Some(settings)
            }
            Err(e) => {
                warn!("Stored branding settings are invalid: {}", e);
                None
            }
        }
    }

    /// Remove the stored document. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Branding settings cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Stored settings, or the default branding
    pub fn get_or_default(&self) -> BrandingSettings {
        self.load().unwrap_or_default()
    }
}

/// Read a file into a `data:` URL, used for uploaded logos and favicons
pub fn file_to_data_url(path: &Path) -> Result<String, StorageError> {
    let bytes = std::fs::read(path)?;
    let mime = mime_for_path(path);
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
