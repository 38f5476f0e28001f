//! REST API
//!
//! Theme CRUD under `/api/v1/themes`, icon lookup under `/api/v1/icons`,
//! and `/health`. Every error body is `{"error": "<message>"}`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use brand_theme::icons::{
    IconCategory, IconContext, IconDefinition, IconError, IconProps, IconSize,
};

use crate::store::{StoreError, ThemeData, ThemeStore};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ThemeStore>,
    pub icons: IconContext,
}

impl AppState {
    pub fn new(store: ThemeStore, icons: IconContext) -> Self {
        Self {
            store: Arc::new(store),
            icons,
        }
    }
}

/// Handler failure, rendered as a JSON error body
#[derive(Debug)]
pub enum ApiError {
    ThemeNotFound,
    IconNotFound,
    RouteNotFound,
    BadRequest(String),
    Store {
        action: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    fn store(action: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { action, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ThemeNotFound => (StatusCode::NOT_FOUND, "Theme not found".to_string()),
            ApiError::IconNotFound => (StatusCode::NOT_FOUND, "Icon not found".to_string()),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Store { action, source } => {
                error!("Error trying to {}: {}", action, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to {}", action),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Build the application router
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/themes", get(list_themes).post(create_theme))
        .route(
            "/api/v1/themes/{id}",
            get(get_theme).put(update_theme).delete(delete_theme),
        )
        .route("/api/v1/icons", get(list_icons))
        .route("/api/v1/icons/{name}", get(get_icon))
        .route("/api/v1/icons/{name}/markup", get(render_icon))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Ids that do not parse can never match a row
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::ThemeNotFound)
}

/// Split a request body into its name and the remaining theme document
fn split_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<(String, ThemeData)> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Value::Object(mut data) = body else {
        return Err(ApiError::BadRequest("Theme must be a JSON object".to_string()));
    };

    let name = match data.remove("name") {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => return Err(ApiError::BadRequest("Theme name is required".to_string())),
    };
    data.remove("id");
    Ok((name, data))
}

async fn list_themes(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let themes = state.store.list().map_err(ApiError::store("fetch themes"))?;
    Ok(Json(themes.iter().map(|t| t.to_json()).collect()))
}

async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    let theme = state
        .store
        .get(id)
        .map_err(ApiError::store("fetch theme"))?
        .ok_or(ApiError::ThemeNotFound)?;
    Ok(Json(theme.to_json()))
}

async fn create_theme(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let (name, data) = split_body(body)?;
    let theme = state
        .store
        .create(&name, &data)
        .map_err(ApiError::store("create theme"))?;
    Ok((StatusCode::CREATED, Json(theme.to_json())))
}

async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    let (name, data) = split_body(body)?;
    let theme = state
        .store
        .update(id, &name, &data)
        .map_err(ApiError::store("update theme"))?
        .ok_or(ApiError::ThemeNotFound)?;
    Ok(Json(theme.to_json()))
}

async fn delete_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    if !state
        .store
        .delete(id)
        .map_err(ApiError::store("delete theme"))?
    {
        return Err(ApiError::ThemeNotFound);
    }
    Ok(Json(json!({ "message": "Theme deleted successfully", "id": id })))
}

#[derive(Debug, Deserialize)]
struct IconQuery {
    category: Option<String>,
    q: Option<String>,
}

async fn list_icons(
    State(state): State<AppState>,
    Query(query): Query<IconQuery>,
) -> ApiResult<Json<Vec<IconDefinition>>> {
    let loader = state.icons.loader();

    if let Some(q) = query.q.as_deref() {
        return Ok(Json(loader.search_icons(q)));
    }

    let category = query
        .category
        .as_deref()
        .map(str::parse::<IconCategory>)
        .transpose()
        .map_err(|e: IconError| ApiError::BadRequest(e.to_string()))?;

    let icons = {
        let registry = loader.registry().read();
        match category {
            Some(category) => registry.get_by_category(category).into_iter().cloned().collect(),
            None => registry.get_all().into_values().collect(),
        }
    };
    Ok(Json(icons))
}

async fn get_icon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<IconDefinition>> {
    state
        .icons
        .loader()
        .get_icon_definition(&name)
        .map(Json)
        .ok_or(ApiError::IconNotFound)
}

#[derive(Debug, Deserialize)]
struct RenderQuery {
    size: Option<String>,
    color: Option<String>,
}

async fn render_icon(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<RenderQuery>,
) -> ApiResult<Response> {
    let icon = state
        .icons
        .load_icon(&name)
        .await
        .ok_or(ApiError::IconNotFound)?;

    let mut props = IconProps::default();
    if let Some(size) = query.size.as_deref() {
        props.size = IconSize::from(size).resolve().to_string();
    }
    if let Some(color) = query.color {
        props.color = color;
    }

    Ok((
        [(CONTENT_TYPE, "text/html; charset=utf-8")],
        icon.render(&props),
    )
        .into_response())
}
