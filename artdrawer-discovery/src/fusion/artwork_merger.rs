//! Artwork Metadata Merger
//!
//! Enrichment returns per-artwork metadata aligned by index with the search artworks.
//! Each field is overridden individually, and only when the enrichment value is present
//! and non-blank. The merger never adds or removes artworks.

use artdrawer_common::models::UNKNOWN_YEAR;
use artdrawer_common::Artwork;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ArtworkMetadata;

/// Minimum number of artworks on a profile
pub const MIN_ARTWORKS: usize = 3;

/// Default media for search-derived artworks before enrichment
pub const DEFAULT_ARTWORK_MEDIA: &str = "Visual Art";

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(1\d{3}|20\d{2})\b").expect("valid regex"));

/// Returns `candidate` when present and non-blank, otherwise `base`
pub fn override_if_present(base: &str, candidate: Option<&str>) -> String {
    match candidate {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => base.to_string(),
    }
}

/// Merge positional enrichment metadata into `base`
pub fn merge(base: &[Artwork], metadata: Option<&[Option<ArtworkMetadata>]>) -> Vec<Artwork> {
    let Some(metadata) = metadata else {
        return base.to_vec();
    };

    base.iter()
        .enumerate()
        .map(|(index, artwork)| match metadata.get(index).and_then(Option::as_ref) {
            Some(meta) => Artwork {
                url: artwork.url.clone(),
                title: override_if_present(&artwork.title, meta.title.as_deref()),
                year: override_if_present(&artwork.year, meta.year.as_deref()),
                media: override_if_present(&artwork.media, meta.media.as_deref()),
            },
            None => artwork.clone(),
        })
        .collect()
}

/// First word-bounded year between 1000 and 2099 in `title`, or [`UNKNOWN_YEAR`]
pub fn extract_year(title: &str) -> String {
    YEAR.find(title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

/// Pad `artworks` with placeholders up to [`MIN_ARTWORKS`]
///
/// Placeholder images are seeded by query and position so they stay stable between
/// searches.
pub fn pad_artworks(mut artworks: Vec<Artwork>, query: &str) -> Vec<Artwork> {
    while artworks.len() < MIN_ARTWORKS {
        let seed = format!("{}{}", query, artworks.len());
        let url = match reqwest::Url::parse("https://picsum.photos/seed/") {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().extend([seed.as_str(), "600", "400"]);
                }
                url.to_string()
            }
            Err(_) => format!("https://picsum.photos/seed/{}/600/400", seed),
        };
        artworks.push(Artwork {
            url,
            title: "Work in Progress".to_string(),
            year: "2024".to_string(),
            media: "Mixed Media".to_string(),
        });
    }
    artworks
}
