//! Provider traits and payload types
//!
//! Every external collaborator of the discovery pipeline is a capability trait so that
//! the service can be assembled with real HTTP clients in production and with fakes in
//! tests:
//! - [`SearchProvider`]: web + image search for a query
//! - [`EnrichmentProvider`]: generative structured profile data and historian chat
//! - [`RemoteDocumentStore`]: per-user cloud document with field-level merge
//! - [`ImageFetcher`]: downloads an image for offline viewing

use artdrawer_common::{Artist, Artwork, Bilingual, Category, CollectionItem, Link};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Search
// ============================================================================

/// Raw search result for one query, before enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    /// Stable id precomputed from the query
    pub id: String,
    pub name: Bilingual,
    pub intro: Bilingual,
    /// At least three entries (padded with placeholders)
    pub artworks: Vec<Artwork>,
    pub links: Vec<Link>,
    /// Best biography snippet from the web results
    pub snippet: String,
}

impl RawSearchResult {
    pub fn artwork_titles(&self) -> Vec<String> {
        self.artworks.iter().map(|a| a.title.clone()).collect()
    }
}

/// Search provider errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Web/image search capability
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Search for an artist by free-text query
    async fn search(&self, query: &str) -> Result<RawSearchResult, SearchError>;
}

// ============================================================================
// Enrichment
// ============================================================================

/// Input context for profile enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRequest {
    pub query: String,
    pub snippet: String,
    pub artwork_titles: Vec<String>,
}

/// Positional metadata for one artwork, as returned by the enrichment provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
}

/// Structured enrichment payload
///
/// Every field is optional. Tags arrive either in the three-bucket shape
/// (movements/materials/themes) or in the older genre/style shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentPayload {
    #[serde(rename = "nameCN", default)]
    pub name_cn: Option<String>,
    #[serde(rename = "introEN", default)]
    pub intro_en: Option<String>,
    #[serde(rename = "introCN", default)]
    pub intro_cn: Option<String>,

    #[serde(default)]
    pub movements: Option<Vec<String>>,
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    #[serde(default, alias = "topics")]
    pub themes: Option<Vec<String>>,

    #[serde(rename = "genreTags", default)]
    pub genre_tags: Option<Vec<String>>,
    #[serde(rename = "styleTags", default)]
    pub style_tags: Option<Vec<String>>,

    #[serde(rename = "mediaTags", default)]
    pub media_tags: Option<Vec<String>>,
    #[serde(rename = "visualElements", default)]
    pub visual_elements: Option<Vec<String>>,

    #[serde(rename = "techniquesEN", default)]
    pub techniques_en: Option<String>,
    #[serde(rename = "techniquesCN", default)]
    pub techniques_cn: Option<String>,

    /// Aligned by index with the search artworks; entries may be null
    #[serde(rename = "artworksMetadata", default)]
    pub artworks_metadata: Option<Vec<Option<ArtworkMetadata>>>,
}

/// Accepts `"1939"`, `1939` or null for year fields
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Enrichment provider errors
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Enrichment provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Provider answered with no usable text
    #[error("Empty response")]
    EmptyResponse,

    /// Provider text is not valid structured data
    #[error("Malformed enrichment payload: {0}")]
    MalformedPayload(String),
}

/// Generative enrichment capability
#[async_trait::async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Structured profile enrichment for a search result
    async fn enrich(&self, request: &EnrichmentRequest) -> Result<EnrichmentPayload, EnrichmentError>;

    /// Free-text answer from the art historian persona
    async fn ask(&self, prompt: &str) -> Result<String, EnrichmentError>;
}

// ============================================================================
// Remote document store
// ============================================================================

/// Per-user cloud document
///
/// Used both as the fetched document and as a merge patch: `None` fields are left
/// untouched on the remote side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<CollectionItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<HashMap<String, Artist>>,
}

/// Remote store errors
#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Per-user remote document store with field-by-field merge writes
#[async_trait::async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Fetch the user's document, `None` if it does not exist
    async fn fetch(&self, uid: &str) -> Result<Option<UserDocument>, RemoteStoreError>;

    /// Merge the present fields of `patch` into the user's document
    async fn merge(&self, uid: &str, patch: &UserDocument) -> Result<(), RemoteStoreError>;
}

// ============================================================================
// Image fetching
// ============================================================================

/// Image fetch errors
#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Not an image: {0}")]
    NotAnImage(String),
}

/// Downloads an image and encodes it for offline display
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch `url` and return it as a `data:<mime>;base64,...` URI
    async fn fetch_data_uri(&self, url: &str) -> Result<String, ImageFetchError>;
}
