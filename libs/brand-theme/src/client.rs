//! Theme service client
//!
//! Thin async client for the `themed` REST API. Every response carries the
//! flattened `{id, name, ...branding}` shape.

use std::borrow::Cow;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::branding::BrandingSettings;

/// Service address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Environment variable overriding the service address
pub const BASE_URL_ENV: &str = "THEME_API_URL";

const THEMES_PATH: &str = "/api/v1/themes";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to {action}: {status}")]
    Status { action: &'static str, status: StatusCode },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// A stored theme as returned by the service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeResponse {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub settings: BrandingSettings,
}

impl Serialize for ThemeResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ThemePayload::new(Some(self.id), &self.name, &self.settings).serialize(serializer)
    }
}

/// Wire form of a theme. The record id is the only `id` on the wire.
#[derive(Serialize)]
struct ThemePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: &'a str,
    #[serde(flatten)]
    settings: Cow<'a, BrandingSettings>,
}

impl<'a> ThemePayload<'a> {
    fn new(id: Option<i64>, name: &'a str, settings: &'a BrandingSettings) -> Self {
        let settings = if settings.id.is_some() {
            let mut owned = settings.clone();
            owned.id = None;
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(settings)
        };
        Self { id, name, settings }
    }
}

/// Client for the theme REST API
#[derive(Debug, Clone)]
pub struct ThemeClient {
    base_url: String,
    http: Client,
}

impl Default for ThemeClient {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ThemeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Use `THEME_API_URL` if set, otherwise the default address
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn themes_url(&self) -> String {
        format!("{}{}", self.base_url, THEMES_PATH)
    }

    fn theme_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, THEMES_PATH, id)
    }

    /// List all themes ordered by id
    pub async fn get_all(&self) -> Result<Vec<ThemeResponse>, ClientError> {
        let response = self.http.get(self.themes_url()).send().await?;
        let response = check(response, "fetch themes")?;
        Ok(response.json().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ThemeResponse, ClientError> {
        let response = self.http.get(self.theme_url(id)).send().await?;
        let response = check(response, "fetch theme")?;
        Ok(response.json().await?)
    }

    pub async fn create(
        &self,
        name: &str,
        settings: &BrandingSettings,
    ) -> Result<ThemeResponse, ClientError> {
        debug!("Creating theme {}", name);
        let response = self
            .http
            .post(self.themes_url())
            .json(&ThemePayload::new(None, name, settings))
            .send()
            .await?;
        let response = check(response, "create theme")?;
        Ok(response.json().await?)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        settings: &BrandingSettings,
    ) -> Result<ThemeResponse, ClientError> {
        debug!("Updating theme {} ({})", id, name);
        let response = self
            .http
            .put(self.theme_url(id))
            .json(&ThemePayload::new(None, name, settings))
            .send()
            .await?;
        let response = check(response, "update theme")?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self.http.delete(self.theme_url(id)).send().await?;
        check(response, "delete theme")?;
        Ok(())
    }

    /// First stored theme, used for the initial load
    pub async fn get_first(&self) -> Result<Option<ThemeResponse>, ClientError> {
        Ok(self.get_all().await?.into_iter().next())
    }
}

fn check(
    response: reqwest::Response,
    action: &'static str,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status { action, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client = ThemeClient::new("http://example.test:3001/");
        assert_eq!(client.base_url(), "http://example.test:3001");
        assert_eq!(client.themes_url(), "http://example.test:3001/api/v1/themes");
        assert_eq!(client.theme_url(7), "http://example.test:3001/api/v1/themes/7");
    }

    #[test]
    fn test_payload_is_flattened() {
        let settings = BrandingSettings::default().with_company_name("Acme");
        let value = serde_json::to_value(ThemePayload::new(None, "Main", &settings)).unwrap();

        assert_eq!(value["name"], "Main");
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["theme"]["theme_color"], "#1976d2");
    }

    #[test]
    fn test_response_decodes_flattened_shape() {
        let json = r##"{"id":3,"name":"Corporate","companyName":"Corporate Inc","theme":{"theme_color":"#2e7d32"}}"##;
        let theme: ThemeResponse = serde_json::from_str(json).unwrap();

        assert_eq!(theme.id, 3);
        assert_eq!(theme.name, "Corporate");
        assert_eq!(theme.settings.company_name, "Corporate Inc");
        assert_eq!(theme.settings.theme.theme_color, "#2e7d32");
        assert_eq!(theme.settings.theme.text_color, "#000000");
    }

    #[test]
    fn test_settings_id_never_reaches_the_wire() {
        let mut settings = BrandingSettings::default().with_company_name("Acme");
        settings.id = Some("3".to_string());

        let payload = serde_json::to_string(&ThemePayload::new(None, "n", &settings)).unwrap();
        assert!(!payload.contains("\"id\""));

        let theme = ThemeResponse {
            id: 3,
            name: "n".to_string(),
            settings,
        };
        let json = serde_json::to_string(&theme).unwrap();
        assert_eq!(json.matches("\"id\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["companyName"], "Acme");
    }

    #[test]
    fn test_status_error_not_found() {
        let err = ClientError::Status {
            action: "fetch theme",
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Failed to fetch theme: 404 Not Found");
    }
}
