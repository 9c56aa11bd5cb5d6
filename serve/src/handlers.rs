//! Request handlers. Pure adapters: name resolution and slot normalization belong to
//! the store and the variable normalizer.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use nebula::{resolve_name, ListResponse, LoadResponse, SaveRequest, SaveResponse, StoreError};

use super::app::AppState;
use super::error::ApiError;

/// `GET /list`. Always 200; a listing failure is logged and reported as no files.
pub(crate) async fn list(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let files = state.store.list().await.unwrap_or_else(|e| {
        warn!("list projects failed: {}", e);
        Vec::new()
    });
    Json(ListResponse { files })
}

/// First `name` parameter of the query string. Decoding is lossy, so this never rejects.
fn name_param(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(k, _)| k == "name")
        .map(|(_, v)| v)
        .unwrap_or_default()
}

/// `GET /load?name=X`. A repeated `name` uses the first occurrence.
pub(crate) async fn load(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LoadResponse>, ApiError> {
    let name = name_param(pairs);
    let doc = state.store.load(&name).await.map_err(|e| match e {
        StoreError::InvalidName => ApiError::MissingName,
        e => {
            debug!("load {:?} failed: {}", name, e);
            ApiError::from(e)
        }
    })?;
    Ok(Json(doc.to_load_response()))
}

/// `POST /save` with `{name, positive_prompt, negative_prompt, vars}`.
pub(crate) async fn save(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?;
    let req = SaveRequest::from_value(&value).ok_or(ApiError::InvalidBody)?;

    if let Err(e) = state
        .store
        .save(&req.name, &req.positive_prompt, &req.negative_prompt, &req.vars)
        .await
    {
        warn!("save {:?} failed: {}", req.name, e);
        return Err(e.into());
    }
    Ok(Json(SaveResponse {
        ok: true,
        name: resolve_name(&req.name),
    }))
}
