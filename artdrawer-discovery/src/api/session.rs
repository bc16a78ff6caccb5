//! Session endpoints
//!
//! Authentication itself happens in the front end; these endpoints receive the
//! resulting identity and trigger the remote collection sync.

use artdrawer_common::Identity;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/session
pub async fn current_session(State(state): State<AppState>) -> ApiResult<Json<Identity>> {
    state
        .session
        .current()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("not signed in".to_string()))
}

/// POST /api/session
pub async fn sign_in(State(state): State<AppState>, Json(identity): Json<Identity>) -> ApiResult<Json<Identity>> {
    if identity.uid.trim().is_empty() {
        return Err(ApiError::BadRequest("uid must not be empty".to_string()));
    }
    state.store.sign_in(identity.clone()).await?;
    Ok(Json(identity))
}

/// POST /api/session/demo
pub async fn sign_in_demo(State(state): State<AppState>) -> ApiResult<Json<Identity>> {
    let identity = Identity::demo();
    state.store.sign_in(identity.clone()).await?;
    Ok(Json(identity))
}

/// DELETE /api/session
pub async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.store.sign_out().await;
    StatusCode::NO_CONTENT
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(current_session).post(sign_in).delete(sign_out))
        .route("/api/session/demo", post(sign_in_demo))
}
