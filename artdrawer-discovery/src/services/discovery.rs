//! Discovery service
//!
//! Orchestrates one user-facing discovery action:
//! validate → connectivity check → search → enrich/assemble → registry upsert → feed.
//! Each step runs strictly after the previous one; separate actions may overlap.

use artdrawer_common::Artist;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::DiscoveryError;
use crate::fusion::ProfileAssembler;
use crate::services::collection_store::CollectionStore;
use crate::services::connectivity::Connectivity;
use crate::services::feed::ResultFeed;
use crate::types::{EnrichmentProvider, SearchProvider};

/// Minimum query length after trimming
pub const MIN_QUERY_CHARS: usize = 2;

/// Artists the daily recommendation is drawn from
pub const FEATURED_ARTISTS: [&str; 5] = [
    "Yayoi Kusama",
    "Jean-Michel Basquiat",
    "Frida Kahlo",
    "Banksy",
    "Salvador Dali",
];

pub const SUGGESTED_STYLES: [&str; 8] = [
    "Cyberpunk Art",
    "Art Nouveau",
    "Minimalism",
    "Baroque",
    "Street Art",
    "Ukiyo-e",
    "Expressionism",
    "Futurism",
];

const SUGGESTED_STYLE_COUNT: usize = 5;

/// Answer given when the historian chat cannot reach its provider
pub const CHAT_FALLBACK: &str = "Failed to connect to the art historian. Please try again later.";

pub struct DiscoveryService {
    search: Arc<dyn SearchProvider>,
    enrichment: Arc<dyn EnrichmentProvider>,
    assembler: ProfileAssembler,
    store: Arc<CollectionStore>,
    feed: Arc<ResultFeed>,
    connectivity: Arc<Connectivity>,
    daily: RwLock<Option<Artist>>,
}

impl DiscoveryService {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        enrichment: Arc<dyn EnrichmentProvider>,
        store: Arc<CollectionStore>,
        feed: Arc<ResultFeed>,
        connectivity: Arc<Connectivity>,
    ) -> Self {
        Self {
            search,
            assembler: ProfileAssembler::new(enrichment.clone()),
            enrichment,
            store,
            feed,
            connectivity,
            daily: RwLock::new(None),
        }
    }

    /// Discover an artist by free-text query
    ///
    /// `Ok(None)` when the search provider yields nothing. A completion that lost the
    /// race against a newer search is still returned and registered, but the feed
    /// keeps the newer result at its head.
    pub async fn search(&self, query: &str) -> Result<Option<Artist>, DiscoveryError> {
        let query = validate_query(query)?;
        self.connectivity.ensure_online("search")?;

        let ticket = self.feed.begin();
        info!(query = %query, "Starting artist search");

        let raw = match self.search.search(query).await {
            Ok(raw) => raw,
            Err(e) => {
                let e = DiscoveryError::from(e);
                warn!(provider = self.search.name(), query = %query, error = %e, "Search yielded no result");
                return Ok(None);
            }
        };

        let artist = self.assembler.assemble(query, &raw).await;
        self.store.upsert_artist(artist.clone()).await?;

        if !self.feed.apply(ticket, artist.clone()).await {
            info!(artist_id = %artist.id, "Search completed after a newer one; feed unchanged");
        }

        Ok(Some(artist))
    }

    /// Recent results, newest first
    pub async fn results(&self) -> Vec<Artist> {
        self.feed.snapshot().await
    }

    /// Random featured artist, discovered once and then cached
    pub async fn daily_recommendation(&self) -> Result<Option<Artist>, DiscoveryError> {
        self.connectivity.ensure_online("daily recommendation")?;

        if let Some(artist) = self.daily.read().await.clone() {
            return Ok(Some(artist));
        }

        let pick = FEATURED_ARTISTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FEATURED_ARTISTS[0]);

        let found = self.search(pick).await?;
        if let Some(artist) = &found {
            let mut daily = self.daily.write().await;
            if daily.is_none() {
                *daily = Some(artist.clone());
            }
            return Ok(daily.clone());
        }
        Ok(None)
    }

    /// Five distinct styles in random order
    pub fn suggested_styles(&self) -> Vec<String> {
        SUGGESTED_STYLES
            .choose_multiple(&mut rand::thread_rng(), SUGGESTED_STYLE_COUNT)
            .map(|s| s.to_string())
            .collect()
    }

    /// Ask the art historian; provider failures yield [`CHAT_FALLBACK`]
    pub async fn chat(&self, message: &str) -> Result<String, DiscoveryError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DiscoveryError::EmptyOrInvalidQuery(message.to_string()));
        }
        self.connectivity.ensure_online("chat")?;

        match self.enrichment.ask(message).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                let e = DiscoveryError::from(e);
                warn!(provider = self.enrichment.name(), error = %e, "Chat unavailable, answering with fallback");
                Ok(CHAT_FALLBACK.to_string())
            }
        }
    }
}

/// Trimmed query, or `EmptyOrInvalidQuery` when shorter than [`MIN_QUERY_CHARS`]
pub fn validate_query(query: &str) -> Result<&str, DiscoveryError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(DiscoveryError::EmptyOrInvalidQuery(trimmed.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  Banksy ").unwrap(), "Banksy");
        assert_eq!(validate_query("草间").unwrap(), "草间");
        assert!(matches!(validate_query(" a "), Err(DiscoveryError::EmptyOrInvalidQuery(_))));
        assert!(matches!(validate_query("   "), Err(DiscoveryError::EmptyOrInvalidQuery(_))));
    }

    #[test]
    fn test_featured_artists_are_valid_queries() {
        for name in FEATURED_ARTISTS {
            assert!(validate_query(name).is_ok());
        }
    }
}
