//! Comparison endpoints

use artdrawer_common::Artist;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    /// Whether the toggled artist is selected afterwards
    pub selected: bool,
    pub artists: Vec<Artist>,
}

/// POST /api/compare/:artist_id
pub async fn toggle_compare(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Json<CompareResponse>> {
    let artist = state
        .store
        .artist(&artist_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", artist_id)))?;

    let selected = state.comparison.toggle(artist).await;
    Ok(Json(CompareResponse {
        selected,
        artists: state.comparison.snapshot().await,
    }))
}

/// GET /api/compare
pub async fn list_compare(State(state): State<AppState>) -> Json<Vec<Artist>> {
    Json(state.comparison.snapshot().await)
}

pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route("/api/compare", get(list_compare))
        .route("/api/compare/:artist_id", post(toggle_compare))
}
