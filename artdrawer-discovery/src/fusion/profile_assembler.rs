//! Profile Assembler
//!
//! Builds the canonical [`Artist`] record from one search result and one enrichment
//! attempt. Search is authoritative for English source text; enrichment supplies the
//! Chinese variants and the AI-only fields. An enrichment failure never fails assembly:
//! every AI-sourced field then takes its documented default.

use artdrawer_common::{Artist, Bilingual};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::artwork_merger;
use super::field_policy::{normalize_links, pick_list, pick_text};
use super::tag_sanitizer;
use crate::error::DiscoveryError;
use crate::types::{EnrichmentPayload, EnrichmentProvider, EnrichmentRequest, RawSearchResult};

/// Raw tag used when no enrichment is available
pub const DEFAULT_RAW_TAG: &str = "Modern Art";
pub const DEFAULT_MEDIA: &[&str] = &["Various"];
pub const DEFAULT_VISUAL_ELEMENTS: &[&str] = &["Vibrant Colors", "Bold Outlines"];

const DEFAULT_NAME_CN: &str = "Google 搜索结果";
const DEFAULT_INTRO_EN: &str = "No biography found.";
const DEFAULT_INTRO_CN: &str = "通过 Google 搜索获取的实时简介。";
const DEFAULT_BACKGROUND_CN: &str = "实时数据获取中";
const DEFAULT_TECHNIQUES_EN: &str = "Extracted via Search";
const DEFAULT_TECHNIQUES_CN: &str = "采用实时 API 数据流";

/// Profile Assembler
///
/// Holds the enrichment capability; the search result is produced upstream by the
/// caller, which must not invoke the assembler without one.
pub struct ProfileAssembler {
    enrichment: Arc<dyn EnrichmentProvider>,
}

impl ProfileAssembler {
    pub fn new(enrichment: Arc<dyn EnrichmentProvider>) -> Self {
        Self { enrichment }
    }

    /// Enrich `search` once and assemble the artist
    pub async fn assemble(&self, query: &str, search: &RawSearchResult) -> Artist {
        let request = EnrichmentRequest {
            query: query.to_string(),
            snippet: search.snippet.clone(),
            artwork_titles: search.artwork_titles(),
        };

        let enrichment = match self.enrichment.enrich(&request).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                let e = DiscoveryError::from(e);
                warn!(
                    provider = self.enrichment.name(),
                    query = %query,
                    error = %e,
                    "Enrichment unavailable, using defaults"
                );
                None
            }
        };

        let artist = build_artist(query, search, enrichment.as_ref());

        info!(
            artist_id = %artist.id,
            enriched = enrichment.is_some(),
            style_count = artist.style.len(),
            "Assembled artist profile"
        );

        artist
    }
}

/// Collect raw tags from the enrichment buckets
///
/// Prefers movements + materials + themes; falls back to the older genre + style shape
/// when all three hold no non-blank tag; uses [`DEFAULT_RAW_TAG`] without enrichment.
pub fn aggregate_tags(enrichment: Option<&EnrichmentPayload>) -> Vec<String> {
    let Some(payload) = enrichment else {
        return vec![DEFAULT_RAW_TAG.to_string()];
    };

    let concat = |buckets: &[&Option<Vec<String>>]| -> Vec<String> {
        buckets
            .iter()
            .filter_map(|bucket| bucket.as_ref())
            .flatten()
            .filter(|tag| !tag.trim().is_empty())
            .cloned()
            .collect()
    };

    let tags = concat(&[&payload.movements, &payload.materials, &payload.themes]);
    if !tags.is_empty() {
        return tags;
    }

    debug!("Enrichment has no movement/material/theme tags, using genre/style tags");
    concat(&[&payload.genre_tags, &payload.style_tags])
}

/// Pure assembly from a search result and optional enrichment
pub fn build_artist(
    query: &str,
    search: &RawSearchResult,
    enrichment: Option<&EnrichmentPayload>,
) -> Artist {
    let ai = enrichment;

    let raw_tags = aggregate_tags(ai);
    let style = tag_sanitizer::sanitize(&raw_tags, query);

    let artworks = artwork_merger::merge(
        &search.artworks,
        ai.and_then(|p| p.artworks_metadata.as_deref()),
    );

    let upper_query = query.trim().to_uppercase();
    let snippet = search.snippet.as_str();

    Artist {
        id: search.id.clone(),
        name: Bilingual {
            en: pick_text(&[Some(search.name.en.as_str())], &upper_query),
            cn: pick_text(
                &[
                    ai.and_then(|p| p.name_cn.as_deref()),
                    Some(search.name.cn.as_str()),
                ],
                DEFAULT_NAME_CN,
            ),
        },
        intro: Bilingual {
            en: pick_text(
                &[
                    Some(search.intro.en.as_str()),
                    ai.and_then(|p| p.intro_en.as_deref()),
                    Some(snippet),
                ],
                DEFAULT_INTRO_EN,
            ),
            cn: pick_text(
                &[
                    ai.and_then(|p| p.intro_cn.as_deref()),
                    Some(search.intro.cn.as_str()),
                ],
                DEFAULT_INTRO_CN,
            ),
        },
        artworks,
        offline_image: None,
        style,
        media: pick_list(ai.and_then(|p| p.media_tags.as_deref()), DEFAULT_MEDIA),
        links: normalize_links(&search.links, query),
        visual_elements: pick_list(
            ai.and_then(|p| p.visual_elements.as_deref()),
            DEFAULT_VISUAL_ELEMENTS,
        ),
        cultural_background: Bilingual {
            en: pick_text(&[Some(snippet)], DEFAULT_INTRO_EN),
            cn: DEFAULT_BACKGROUND_CN.to_string(),
        },
        techniques: Bilingual {
            en: pick_text(
                &[ai.and_then(|p| p.techniques_en.as_deref())],
                DEFAULT_TECHNIQUES_EN,
            ),
            cn: pick_text(
                &[ai.and_then(|p| p.techniques_cn.as_deref())],
                DEFAULT_TECHNIQUES_CN,
            ),
        },
    }
}
