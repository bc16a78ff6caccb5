//! Web/image search client (Google Custom Search JSON API)
//!
//! One query costs two requests: an image search for the top artworks and a web search
//! for the biography snippet and external links. Both must succeed for a result.

use artdrawer_common::slug::stable_artist_id;
use artdrawer_common::{Artwork, Bilingual, Link};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::fusion::artwork_merger::{extract_year, pad_artworks, DEFAULT_ARTWORK_MEDIA};
use crate::fusion::field_policy::{search_fallback_link, MAX_LINKS};
use crate::types::{RawSearchResult, SearchError, SearchProvider};

const SEARCH_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const USER_AGENT: &str = concat!("ArtDrawer/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

const IMAGE_RESULT_COUNT: &str = "3";
const WEB_RESULT_COUNT: &str = "4";

const NO_BIOGRAPHY: &str = "No biography found.";
const SEARCH_NAME_CN: &str = "Google 搜索结果";
const SEARCH_INTRO_CN: &str = "通过 Google 搜索获取的实时简介。";

/// Custom Search response (subset)
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<SearchItem>>,
    #[serde(default)]
    pub error: Option<SearchApiError>,
}

/// Custom Search result item
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub link: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Error object embedded in a Custom Search response
#[derive(Debug, Deserialize)]
pub struct SearchApiError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Google Custom Search client
pub struct GoogleSearchClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    engine_id: Option<String>,
}

impl GoogleSearchClient {
    /// Create a client; missing credentials make every search fail with `NotConfigured`
    pub fn new(api_key: Option<String>, engine_id: Option<String>) -> Result<Self, SearchError> {
        Self::with_base_url(SEARCH_BASE_URL, api_key, engine_id)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        engine_id: Option<String>,
    ) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
            engine_id,
        })
    }

    fn credentials(&self) -> Result<(&str, &str), SearchError> {
        match (self.api_key.as_deref(), self.engine_id.as_deref()) {
            (Some(key), Some(cx)) => Ok((key, cx)),
            (None, _) => Err(SearchError::NotConfigured("missing API key".to_string())),
            (_, None) => Err(SearchError::NotConfigured("missing search engine id".to_string())),
        }
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<SearchResponse, SearchError> {
        let (key, cx) = self.credentials()?;

        tracing::debug!(params = ?params, "Querying search API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("key", key), ("cx", cx)])
            .query(params)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(status.as_u16(), error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        if let Some(error) = &body.error {
            return Err(SearchError::Api(
                error.code.unwrap_or(500),
                error.message.clone().unwrap_or_default(),
            ));
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearchClient {
    fn name(&self) -> &'static str {
        "google-custom-search"
    }

    async fn search(&self, query: &str) -> Result<RawSearchResult, SearchError> {
        let image_query = format!("{} artworks painting", query);
        let images = self
            .fetch(&[
                ("q", image_query.as_str()),
                ("searchType", "image"),
                ("num", IMAGE_RESULT_COUNT),
            ])
            .await?;

        let web_query = format!("{} artist biography official website museum", query);
        let web = self
            .fetch(&[("q", web_query.as_str()), ("num", WEB_RESULT_COUNT)])
            .await?;

        let result = build_search_result(query, images, web);

        tracing::info!(
            query = %query,
            artist_id = %result.id,
            links = result.links.len(),
            "Retrieved search result"
        );

        Ok(result)
    }
}

/// Map image and web responses into a raw search result
pub fn build_search_result(query: &str, images: SearchResponse, web: SearchResponse) -> RawSearchResult {
    let artworks: Vec<Artwork> = images
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let title = item
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Untitled".to_string());
            Artwork {
                url: item.link,
                year: extract_year(&title),
                title,
                media: DEFAULT_ARTWORK_MEDIA.to_string(),
            }
        })
        .collect();
    let artworks = pad_artworks(artworks, query);

    let web_items = web.items.unwrap_or_default();

    let snippet = web_items
        .first()
        .and_then(|item| item.snippet.clone())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NO_BIOGRAPHY.to_string());

    let mut seen = HashSet::new();
    let mut links: Vec<Link> = web_items
        .iter()
        .filter_map(|item| link_for(&item.link))
        .filter(|link| seen.insert(link.url.clone()))
        .take(MAX_LINKS)
        .collect();

    if links.is_empty() {
        links.push(search_fallback_link(query));
    }

    RawSearchResult {
        id: stable_artist_id(query),
        name: Bilingual::new(query.to_uppercase(), SEARCH_NAME_CN),
        intro: Bilingual::new(snippet.clone(), SEARCH_INTRO_CN),
        artworks,
        links,
        snippet,
    }
}

/// Link labelled with the uppercased host name; unparseable urls are skipped
fn link_for(url: &str) -> Option<Link> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let label = host.strip_prefix("www.").unwrap_or(host).to_uppercase();
    Some(Link::new(label, url))
}
