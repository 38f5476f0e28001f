//! Themed configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use brand_theme::LoaderConfig;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemedConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Theme database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Icon loading
    #[serde(default)]
    pub icons: IconsConfig,

    /// Daemon settings
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API with credentials
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Icon loader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Icons loaded at startup
    #[serde(default)]
    pub preload: Vec<String>,

    /// Per-import timeout in milliseconds; unset waits indefinitely
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl IconsConfig {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            preload_icons: self.preload.clone(),
            load_timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_database_path() -> PathBuf {
    PathBuf::from("/var/lib/themed/themes.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ThemedConfig {
    /// Load configuration from file, or defaults when it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply a `PORT` value when present and numeric
    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} value {:?}: {}", PORT_ENV, port, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ThemedConfig::load(&dir.path().join("themed.toml")).unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.daemon.log_level, "info");
        assert!(config.icons.preload.is_empty());
        assert_eq!(config.icons.loader_config().load_timeout, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("themed.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[database]
path = "/tmp/themes.db"

[icons]
preload = ["business", "settings"]
timeout_ms = 250
"#,
        )
        .unwrap();

        let config = ThemedConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, PathBuf::from("/tmp/themes.db"));

        let loader = config.icons.loader_config();
        assert_eq!(loader.preload_icons, vec!["business", "settings"]);
        assert_eq!(loader.load_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("themed.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(ThemedConfig::load(&path).is_err());
    }

    #[test]
    fn test_port_override() {
        let mut config = ThemedConfig::default();
        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.port, 3001);

        config.apply_port_override(Some("4000")).unwrap();
        assert_eq!(config.server.port, 4000);

        assert!(config.apply_port_override(Some("http")).is_err());
        assert_eq!(config.server.port, 4000);
    }
}
