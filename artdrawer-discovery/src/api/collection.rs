//! Collection endpoints: drawers (categories), membership, favorites, registry

use artdrawer_common::{Artist, Category, CollectionItem};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::{DrawerEntry, DrawerSummary};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub artist_id: String,
    pub category_id: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub collected: bool,
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.categories().await)
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.store.add_category(&request.name, request.color).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    let category = state.store.update_category(&id, &request.name, request.color).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id
pub async fn delete_category(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.store.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/collection/toggle
///
/// Artists known to the registry go through the full collect path (offline image
/// capture included); unknown ids only flip membership.
pub async fn toggle_collection(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let collected = match state.store.artist(&request.artist_id).await {
        Some(artist) => state.store.collect(artist, &request.category_id).await?,
        None => {
            state
                .store
                .toggle_membership(&request.artist_id, &request.category_id)
                .await?
        }
    };
    Ok(Json(ToggleResponse { collected }))
}

/// GET /api/favorites
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<CollectionItem>> {
    Json(state.store.favorites().await)
}

/// GET /api/drawers
pub async fn list_drawers(State(state): State<AppState>) -> Json<Vec<DrawerSummary>> {
    Json(state.store.drawers().await)
}

/// GET /api/drawers/:id
pub async fn drawer_items(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Vec<DrawerEntry>>> {
    Ok(Json(state.store.drawer_items(&id).await?))
}

/// GET /api/registry/:id
pub async fn registry_entry(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Artist>> {
    state
        .store
        .artist(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", id)))
}

pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/:id", put(update_category).delete(delete_category))
        .route("/api/collection/toggle", post(toggle_collection))
        .route("/api/favorites", get(list_favorites))
        .route("/api/drawers", get(list_drawers))
        .route("/api/drawers/:id", get(drawer_items))
        .route("/api/registry/:id", get(registry_entry))
}
