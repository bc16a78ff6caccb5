//! Connectivity endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectivityStatus {
    pub online: bool,
}

/// GET /api/connectivity
pub async fn get_connectivity(State(state): State<AppState>) -> Json<ConnectivityStatus> {
    Json(ConnectivityStatus {
        online: state.connectivity.is_online(),
    })
}

/// PUT /api/connectivity
pub async fn set_connectivity(
    State(state): State<AppState>,
    Json(request): Json<ConnectivityStatus>,
) -> Json<ConnectivityStatus> {
    state.connectivity.set_online(request.online);
    Json(ConnectivityStatus {
        online: state.connectivity.is_online(),
    })
}

pub fn connectivity_routes() -> Router<AppState> {
    Router::new().route("/api/connectivity", get(get_connectivity).put(set_connectivity))
}
