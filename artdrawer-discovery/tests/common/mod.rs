//! Shared fakes for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use artdrawer_common::slug::stable_artist_id;
use artdrawer_common::{Artwork, Bilingual, Link};
use artdrawer_discovery::services::InMemoryDocumentStore;
use artdrawer_discovery::types::{
    ArtworkMetadata, EnrichmentError, EnrichmentPayload, EnrichmentProvider, EnrichmentRequest,
    ImageFetchError, ImageFetcher, RawSearchResult, SearchError, SearchProvider,
};
use artdrawer_discovery::{AppState, Providers};
use tokio::sync::Notify;

pub const FRIDA_SNIPPET: &str = "Frida Kahlo was a Mexican painter known for her self-portraits.";

/// Raw result shaped like the real search client output
pub fn raw_result(query: &str, snippet: &str) -> RawSearchResult {
    RawSearchResult {
        id: stable_artist_id(query),
        name: Bilingual::new(query.to_uppercase(), "Google 搜索结果"),
        intro: Bilingual::new(snippet, "通过 Google 搜索获取的实时简介。"),
        artworks: (1..=3)
            .map(|i| Artwork {
                url: format!("https://img.example/{}/{}.jpg", stable_artist_id(query), i),
                title: format!("Image {}", i),
                year: "Unknown Year".to_string(),
                media: "Visual Art".to_string(),
            })
            .collect(),
        links: vec![
            Link::new("FRIDAKAHLO.ORG", "https://www.fridakahlo.org"),
            Link::new("FRIDAKAHLO.ORG", "https://www.fridakahlo.org"),
        ],
        snippet: snippet.to_string(),
    }
}

/// Search fake: answers every query unless told to fail; queries can be held back
#[derive(Default)]
pub struct FakeSearch {
    pub calls: AtomicUsize,
    pub started: Mutex<Vec<String>>,
    failing: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, query: &str) {
        self.failing.lock().unwrap().push(query.to_string());
    }

    /// Hold `query` until [`FakeSearch::release`] is called
    pub fn hold(&self, query: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(query.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, query: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(query) {
            gate.notify_one();
        }
    }

    pub fn has_started(&self, query: &str) -> bool {
        self.started.lock().unwrap().iter().any(|q| q == query)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &'static str {
        "fake-search"
    }

    async fn search(&self, query: &str) -> Result<RawSearchResult, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.lock().unwrap().push(query.to_string());

        let gate = self.gates.lock().unwrap().get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().unwrap().iter().any(|q| q == query) {
            return Err(SearchError::Api(403, "quota exceeded".to_string()));
        }

        let snippet = if query == "Frida Kahlo" {
            FRIDA_SNIPPET.to_string()
        } else {
            format!("{} is an artist.", query)
        };
        Ok(raw_result(query, &snippet))
    }
}

/// Enrichment fake: returns a fixed payload, or fails when none is set
pub struct FakeEnrichment {
    payload: Option<EnrichmentPayload>,
    pub answer: Option<String>,
}

impl FakeEnrichment {
    pub fn failing() -> Self {
        Self {
            payload: None,
            answer: None,
        }
    }

    pub fn with_payload(payload: EnrichmentPayload) -> Self {
        Self {
            payload: Some(payload),
            answer: Some("Kahlo painted 55 self-portraits.".to_string()),
        }
    }
}

#[async_trait::async_trait]
impl EnrichmentProvider for FakeEnrichment {
    fn name(&self) -> &'static str {
        "fake-enrichment"
    }

    async fn enrich(&self, _request: &EnrichmentRequest) -> Result<EnrichmentPayload, EnrichmentError> {
        self.payload
            .clone()
            .ok_or_else(|| EnrichmentError::MalformedPayload("expected value at line 1".to_string()))
    }

    async fn ask(&self, _prompt: &str) -> Result<String, EnrichmentError> {
        self.answer
            .clone()
            .ok_or_else(|| EnrichmentError::Network("connection reset".to_string()))
    }
}

pub struct FakeImages;

#[async_trait::async_trait]
impl ImageFetcher for FakeImages {
    async fn fetch_data_uri(&self, _url: &str) -> Result<String, ImageFetchError> {
        Ok("data:image/jpeg;base64,/9j/".to_string())
    }
}

/// Enrichment payload for the Frida Kahlo scenario
pub fn frida_payload() -> EnrichmentPayload {
    EnrichmentPayload {
        name_cn: Some("弗里达·卡罗".to_string()),
        intro_cn: Some("墨西哥画家，以自画像闻名。".to_string()),
        movements: Some(vec!["Surrealism".to_string(), "ARTIST".to_string()]),
        materials: Some(vec!["Oil".to_string()]),
        themes: Some(vec!["Identity".to_string(), "Frida".to_string(), "Surrealism".to_string()]),
        media_tags: Some(vec!["Painting".to_string()]),
        visual_elements: Some(vec!["Vivid Colors".to_string()]),
        artworks_metadata: Some(vec![
            Some(ArtworkMetadata {
                title: Some("The Two Fridas".to_string()),
                year: Some("1939".to_string()),
                media: Some("Oil on canvas".to_string()),
            }),
            None,
            Some(ArtworkMetadata {
                title: Some("  ".to_string()),
                year: Some("1940".to_string()),
                media: None,
            }),
        ]),
        ..Default::default()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub search: Arc<FakeSearch>,
    pub remote: Arc<InMemoryDocumentStore>,
}

/// App state over an in-memory database with fake providers
pub async fn test_app(enrichment: FakeEnrichment) -> TestApp {
    let db = artdrawer_discovery::db::init_memory_pool().await.unwrap();
    let search = Arc::new(FakeSearch::new());
    let remote = Arc::new(InMemoryDocumentStore::new());

    let providers = Providers {
        search: search.clone(),
        enrichment: Arc::new(enrichment),
        images: Arc::new(FakeImages),
        remote: Some(remote.clone()),
    };

    let state = AppState::new(db, providers, true).await.unwrap();
    TestApp { state, search, remote }
}
