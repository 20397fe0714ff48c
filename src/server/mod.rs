//! OData-style HTTP surface for the catalog service.
//!
//! Routes, relative to the configured base path:
//! - `GET /` service document
//! - `GET /Books` whole collection (query options are accepted and ignored)
//! - `GET /Books(<key>)` or `GET /Books(ID=<key>)` single book

pub mod identity;
pub mod response;

use crate::core::service::CatalogService;
use crate::core::ReadRequest;
use crate::domain::model::BOOKS_ENTITY;
use crate::utils::error::Result;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use identity::UserDirectory;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(service: CatalogService, users: UserDirectory) -> Self {
        Self {
            service: Arc::new(service),
            users: Arc::new(users),
        }
    }
}

pub fn router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route("/", get(service_root))
        .route(&format!("/{}", BOOKS_ENTITY), get(read_collection))
        .route("/{entity_key}", get(read_entity))
        .with_state(state);

    if base_path == "/" {
        api
    } else {
        // nest 只匹配不帶結尾斜線的 `{base}`
        Router::new()
            .route(&format!("{}/", base_path), get(service_root))
            .nest(base_path, api)
    }
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("🛑 Shutdown signal received");
}

async fn service_root() -> Json<Value> {
    Json(response::service_document())
}

async fn read_collection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>> {
    let request = ReadRequest::books()
        .with_user(state.users.resolve(&headers))
        .with_query(query);

    tracing::info!("READ {}", request.entity);
    let result = state.service.read_books(&request).await?;
    Ok(Json(response::entity_payload(result)))
}

async fn read_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(entity_key): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>> {
    let (entity, key) = parse_entity_key(&entity_key);
    let mut request = ReadRequest {
        entity,
        ..Default::default()
    }
    .with_user(state.users.resolve(&headers))
    .with_query(query);
    if let Some(key) = key {
        request = request.with_key(key);
    }

    tracing::info!("READ {}", entity_key);
    let result = state.service.read(&request).await?;
    Ok(Json(response::entity_payload(result)))
}

/// 解析 `Books(201)`、`Books(ID=201)`、`Books('b-1')` 這類路徑片段
pub fn parse_entity_key(segment: &str) -> (String, Option<Value>) {
    let Some((entity, rest)) = segment.split_once('(') else {
        return (segment.to_string(), None);
    };
    let Some(inner) = rest.strip_suffix(')') else {
        return (segment.to_string(), None);
    };

    let raw = match inner.split_once('=') {
        Some((_, value)) => value.trim(),
        None => inner.trim(),
    };

    let key = if let Some(text) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        Value::String(text.replace("''", "'"))
    } else if let Ok(i) = raw.parse::<i64>() {
        Value::from(i)
    } else {
        Value::String(raw.to_string())
    };

    (entity.to_string(), Some(key))
}
