//! Error types for the discovery service
//!
//! - [`DiscoveryError`]: service-level outcomes of the discovery pipeline
//! - [`ApiError`]: HTTP mapping with a `{"error": {"code", "message"}}` body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::{EnrichmentError, SearchError};

/// Discovery pipeline errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Search or enrichment transport/API failure
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Enrichment text is not valid payload JSON
    #[error("Malformed enrichment payload: {0}")]
    MalformedEnrichmentPayload(String),

    /// Trimmed query shorter than the minimum length
    #[error("Empty or invalid query: {0:?}")]
    EmptyOrInvalidQuery(String),

    /// Network-dependent operation requested while offline
    #[error("Unavailable while offline: {0}")]
    OfflineUnavailable(String),

    /// Local collection store failure
    #[error(transparent)]
    Store(#[from] artdrawer_common::Error),
}

impl From<SearchError> for DiscoveryError {
    fn from(err: SearchError) -> Self {
        DiscoveryError::ProviderUnavailable(err.to_string())
    }
}

impl From<EnrichmentError> for DiscoveryError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::MalformedPayload(msg) => DiscoveryError::MalformedEnrichmentPayload(msg),
            other => DiscoveryError::ProviderUnavailable(other.to_string()),
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Requires network access (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Upstream provider failure (502)
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// artdrawer-common error
    #[error("Common error: {0}")]
    Common(#[from] artdrawer_common::Error),
}

impl From<DiscoveryError> for ApiError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::EmptyOrInvalidQuery(_) => ApiError::BadRequest(err.to_string()),
            DiscoveryError::OfflineUnavailable(_) => ApiError::Unavailable(err.to_string()),
            DiscoveryError::ProviderUnavailable(_) | DiscoveryError::MalformedEnrichmentPayload(_) => {
                ApiError::BadGateway(err.to_string())
            }
            DiscoveryError::Store(inner) => ApiError::Common(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "OFFLINE", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "PROVIDER_UNAVAILABLE", msg),
            ApiError::Common(err) => match err {
                artdrawer_common::Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
                artdrawer_common::Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
                other => (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR", other.to_string()),
            },
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
