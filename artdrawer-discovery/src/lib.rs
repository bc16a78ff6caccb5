//! artdrawer-discovery library interface
//!
//! Exposes the discovery pipeline, collection store and HTTP router for the binary and
//! for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod fusion;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult, DiscoveryError};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{
    CollectionStore, ComparisonSet, Connectivity, DiscoveryService, ResultFeed, Session,
};
use crate::types::{EnrichmentProvider, ImageFetcher, RemoteDocumentStore, SearchProvider};

/// External collaborators injected into the service
#[derive(Clone)]
pub struct Providers {
    pub search: Arc<dyn SearchProvider>,
    pub enrichment: Arc<dyn EnrichmentProvider>,
    pub images: Arc<dyn ImageFetcher>,
    /// `None` keeps persistence local-only
    pub remote: Option<Arc<dyn RemoteDocumentStore>>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<DiscoveryService>,
    pub store: Arc<CollectionStore>,
    pub comparison: Arc<ComparisonSet>,
    pub connectivity: Arc<Connectivity>,
    pub session: Arc<Session>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Load the collection store from `db` and wire the services together
    pub async fn new(db: SqlitePool, providers: Providers, online: bool) -> artdrawer_common::Result<Self> {
        let connectivity = Arc::new(Connectivity::new(online));
        let session = Arc::new(Session::new());
        let feed = Arc::new(ResultFeed::new());

        let store = Arc::new(
            CollectionStore::load(
                db,
                providers.images,
                providers.remote,
                connectivity.clone(),
                session.clone(),
            )
            .await?,
        );

        let discovery = Arc::new(DiscoveryService::new(
            providers.search,
            providers.enrichment,
            store.clone(),
            feed,
            connectivity.clone(),
        ));

        Ok(Self {
            discovery,
            store,
            comparison: Arc::new(ComparisonSet::new()),
            connectivity,
            session,
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::discovery_routes())
        .merge(api::collection_routes())
        .merge(api::compare_routes())
        .merge(api::connectivity_routes())
        .merge(api::session_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
