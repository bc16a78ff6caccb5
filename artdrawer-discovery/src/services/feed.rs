//! Recent-results feed and comparison set
//!
//! Searches may overlap. Each search takes a [`SearchTicket`] before any network call;
//! when it completes, the feed accepts the artist only if no newer ticket has been
//! applied yet. Stale completions never reorder the feed.

use artdrawer_common::Artist;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Maximum number of artists kept in the feed
pub const MAX_FEED_ENTRIES: usize = 10;

/// Maximum number of artists selected for side-by-side comparison
pub const MAX_COMPARISON_ENTRIES: usize = 2;

/// Generation number taken when a search starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
struct FeedState {
    artists: Vec<Artist>,
    applied: u64,
}

/// Newest-first list of recently discovered artists
#[derive(Debug, Default)]
pub struct ResultFeed {
    next_generation: AtomicU64,
    state: RwLock<FeedState>,
}

impl ResultFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a search that is about to start
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.next_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Put `artist` at the head of the feed unless a newer search was already applied
    ///
    /// Returns `false` for a stale completion. An artist already in the feed is moved
    /// rather than duplicated.
    pub async fn apply(&self, ticket: SearchTicket, artist: Artist) -> bool {
        let mut state = self.state.write().await;
        if ticket.0 <= state.applied {
            tracing::debug!(
                ticket = ticket.0,
                applied = state.applied,
                artist_id = %artist.id,
                "Dropping stale search completion from feed"
            );
            return false;
        }

        state.applied = ticket.0;
        state.artists.retain(|a| a.id != artist.id);
        state.artists.insert(0, artist);
        state.artists.truncate(MAX_FEED_ENTRIES);
        true
    }

    pub async fn snapshot(&self) -> Vec<Artist> {
        self.state.read().await.artists.clone()
    }
}

/// Up to two artists selected for comparison
#[derive(Debug, Default)]
pub struct ComparisonSet {
    artists: RwLock<Vec<Artist>>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselect when present, otherwise select if there is room
    ///
    /// Returns whether the artist is selected afterwards.
    pub async fn toggle(&self, artist: Artist) -> bool {
        let mut artists = self.artists.write().await;
        if let Some(pos) = artists.iter().position(|a| a.id == artist.id) {
            artists.remove(pos);
            return false;
        }
        if artists.len() < MAX_COMPARISON_ENTRIES {
            artists.push(artist);
            return true;
        }
        false
    }

    pub async fn snapshot(&self) -> Vec<Artist> {
        self.artists.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artdrawer_common::Bilingual;

    fn artist(id: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: Bilingual::new(id.to_uppercase(), id),
            intro: Bilingual::default(),
            artworks: vec![],
            offline_image: None,
            style: vec![],
            media: vec![],
            links: vec![],
            visual_elements: vec![],
            cultural_background: Bilingual::default(),
            techniques: Bilingual::default(),
        }
    }

    fn ids(artists: &[Artist]) -> Vec<&str> {
        artists.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_newest_first_and_moved_not_duplicated() {
        let feed = ResultFeed::new();
        for id in ["a", "b", "a"] {
            let ticket = feed.begin();
            assert!(feed.apply(ticket, artist(id)).await);
        }
        assert_eq!(ids(&feed.snapshot().await), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_stale_completion_is_dropped() {
        let feed = ResultFeed::new();
        let slow = feed.begin();
        let fast = feed.begin();

        assert!(feed.apply(fast, artist("fast")).await);
        assert!(!feed.apply(slow, artist("slow")).await);
        assert_eq!(ids(&feed.snapshot().await), vec!["fast"]);
    }

    #[tokio::test]
    async fn test_feed_is_capped() {
        let feed = ResultFeed::new();
        for i in 0..15 {
            let ticket = feed.begin();
            feed.apply(ticket, artist(&format!("a{}", i))).await;
        }
        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.len(), MAX_FEED_ENTRIES);
        assert_eq!(snapshot[0].id, "a14");
    }

    #[tokio::test]
    async fn test_comparison_holds_two() {
        let set = ComparisonSet::new();
        assert!(set.toggle(artist("a")).await);
        assert!(set.toggle(artist("b")).await);
        assert!(!set.toggle(artist("c")).await);
        assert_eq!(ids(&set.snapshot().await), vec!["a", "b"]);

        assert!(!set.toggle(artist("a")).await);
        assert_eq!(ids(&set.snapshot().await), vec!["b"]);

        assert!(!set.toggle(artist("b")).await);
        assert!(set.snapshot().await.is_empty());
    }
}
