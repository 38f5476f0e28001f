//! SQLite theme store
//!
//! Themes are named JSON documents. The document is stored verbatim in
//! `json_data`; only `name` is lifted into its own column.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use brand_theme::BrandingSettings;

/// Theme document, minus `id` and `name`
pub type ThemeData = Map<String, Value>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS themes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        json_data TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid theme document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// A stored theme
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRecord {
    pub id: i64,
    pub name: String,
    pub data: ThemeData,
}

impl ThemeRecord {
    /// Wire shape: `{id, name, ...data}`
    pub fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(self.data.len() + 2);
        object.insert("id".to_string(), Value::from(self.id));
        object.insert("name".to_string(), Value::from(self.name.clone()));
        for (key, value) in &self.data {
            if key != "id" && key != "name" {
                object.insert(key.clone(), value.clone());
            }
        }
        Value::Object(object)
    }
}

/// Theme table behind a single serialized connection
pub struct ThemeStore {
    conn: Mutex<Connection>,
}

impl ThemeStore {
    /// Open (or create) the database file and ensure the schema
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        debug!("Themes table created or already exists");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let guard = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&guard)
    }

    /// All themes ordered by id
    pub fn list(&self) -> Result<Vec<ThemeRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, json_data FROM themes ORDER BY id")?;
            let rows = stmt.query_map([], read_row)?;

            let mut themes = Vec::new();
            for row in rows {
                themes.push(decode(row?)?);
            }
            Ok(themes)
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<ThemeRecord>, StoreError> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, json_data FROM themes WHERE id = ?1",
                    params![id],
                    read_row,
                )
                .optional()?;
            row.map(decode).transpose()
        })
    }

    pub fn create(&self, name: &str, data: &ThemeData) -> Result<ThemeRecord, StoreError> {
        let json = serde_json::to_string(data)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO themes (name, json_data) VALUES (?1, ?2)",
                params![name, json],
            )?;
            let id = conn.last_insert_rowid();
            info!("Created theme {} ({})", id, name);
            Ok(ThemeRecord {
                id,
                name: name.to_string(),
                data: data.clone(),
            })
        })
    }

    /// Replace name and document. `None` when the theme does not exist.
    pub fn update(
        &self,
        id: i64,
        name: &str,
        data: &ThemeData,
    ) -> Result<Option<ThemeRecord>, StoreError> {
        let json = serde_json::to_string(data)?;
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE themes SET name = ?1, json_data = ?2, updated_at = CURRENT_TIMESTAMP WHERE id = ?3",
                params![name, json, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            info!("Updated theme {} ({})", id, name);
            Ok(Some(ThemeRecord {
                id,
                name: name.to_string(),
                data: data.clone(),
            }))
        })
    }

    /// Delete a theme, returning whether it existed
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM themes WHERE id = ?1", params![id])?;
            if changed > 0 {
                info!("Deleted theme {}", id);
            }
            Ok(changed > 0)
        })
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM themes", [], |row| row.get(0))?)
        })
    }

    /// Seed the sample themes into an empty table.
    ///
    /// Returns `false` without writing when themes already exist.
    pub fn seed_defaults(&self) -> Result<bool, StoreError> {
        if self.count()? > 0 {
            info!("Themes already exist, skipping seed");
            return Ok(false);
        }

        for (name, settings) in default_themes() {
            self.create(name, &settings_to_data(&settings)?)?;
        }
        info!("Seeded database with default themes");
        Ok(true)
    }
}

type RawRow = (i64, String, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode((id, name, json): RawRow) -> Result<ThemeRecord, StoreError> {
    let data = match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Ok(ThemeRecord { id, name, data })
}

/// Branding document as stored theme data
pub fn settings_to_data(settings: &BrandingSettings) -> Result<ThemeData, StoreError> {
    match serde_json::to_value(settings)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        _ => Ok(Map::new()),
    }
}

/// Sample themes written by `init-db`
pub fn default_themes() -> Vec<(&'static str, BrandingSettings)> {
    let demo = BrandingSettings::default()
        .with_company_name("Demo Company")
        .with_company_url("https://demo.example.com");

    let mut corporate = BrandingSettings::default()
        .with_company_name("Corporate Inc")
        .with_company_url("https://corporate.example.com");
    corporate.theme.theme_color = "#2e7d32".to_string();
    corporate.theme.primary_dark_color = "#1b5e20".to_string();
    corporate.theme.extra_light_color = "#c8e6c9".to_string();
    corporate.theme.text_color = "#212121".to_string();
    corporate.theme.font_family = "Open Sans, sans-serif".to_string();
    corporate.theme.button.primary_color = "#2e7d32".to_string();
    corporate.theme.button.secondary_color = "#ff5722".to_string();
    corporate.theme.button.hover_color = "#1b5e20".to_string();
    corporate.theme.button.border_color = "#bdbdbd".to_string();
    corporate.capabilities.general_app_title = "Corporate Portal".to_string();

    vec![("Default Theme", demo), ("Corporate Theme", corporate)]
}
