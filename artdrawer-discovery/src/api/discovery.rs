//! Discovery endpoints: search, feed, daily recommendation, styles, historian chat

use artdrawer_common::Artist;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// POST /api/search
pub async fn search(State(state): State<AppState>, Json(request): Json<SearchRequest>) -> ApiResult<Json<Artist>> {
    state
        .discovery
        .search(&request.query)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no search result for {:?}", request.query.trim())))
}

/// GET /api/results
pub async fn results(State(state): State<AppState>) -> Json<Vec<Artist>> {
    Json(state.discovery.results().await)
}

/// GET /api/daily
pub async fn daily(State(state): State<AppState>) -> ApiResult<Json<Artist>> {
    state
        .discovery
        .daily_recommendation()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("daily recommendation unavailable".to_string()))
}

/// GET /api/styles/suggested
pub async fn suggested_styles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.discovery.suggested_styles())
}

/// POST /api/chat
pub async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> ApiResult<Json<ChatResponse>> {
    let answer = state.discovery.chat(&request.message).await?;
    Ok(Json(ChatResponse { answer }))
}

pub fn discovery_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", post(search))
        .route("/api/results", get(results))
        .route("/api/daily", get(daily))
        .route("/api/styles/suggested", get(suggested_styles))
        .route("/api/chat", post(chat))
}
