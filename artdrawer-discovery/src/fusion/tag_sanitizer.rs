//! Tag Sanitizer
//!
//! Turns the raw tag buckets returned by enrichment into the artist's `style` list:
//! 1. Deduplicate (case-sensitive, first-seen order kept)
//! 2. Drop blank tags and generic/meta terms from [`TAG_BLACKLIST`]
//! 3. Drop the artist's own name
//! 4. Drop fragments of the artist's name longer than 3 characters
//! 5. Drop anything mentioning Wikipedia
//! 6. Keep at most [`MAX_STYLE_TAGS`]
//! 7. Fall back to [`FALLBACK_STYLE_TAG`] when nothing survives

use std::collections::HashSet;
use tracing::debug;

/// Generic or meta terms that never describe an artist's style
pub const TAG_BLACKLIST: &[&str] = &[
    "ARTIST",
    "VARIOUS",
    "REAL-TIME",
    "LIVE DISCOVERY",
    "SEARCH RESULT",
    "GOOGLE",
    "IMAGES",
    "UNKNOWN",
    "N/A",
    "UNDEFINED",
    "PROFILE",
    "BIOGRAPHY",
];

pub const MAX_STYLE_TAGS: usize = 10;

pub const FALLBACK_STYLE_TAG: &str = "Visual Art";

/// Tags at or below this length are exempt from the name-fragment rule
const NAME_FRAGMENT_MIN_LEN: usize = 3;

/// Sanitize raw tags for an artist found by `query`
pub fn sanitize<S: AsRef<str>>(raw_tags: &[S], query: &str) -> Vec<String> {
    let upper_query = query.trim().to_uppercase();
    let mut seen = HashSet::new();

    let mut tags: Vec<String> = raw_tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| seen.insert(*tag))
        .filter(|tag| keep_tag(tag, &upper_query))
        .take(MAX_STYLE_TAGS)
        .map(str::to_string)
        .collect();

    if tags.is_empty() {
        debug!(query = %query, raw_count = raw_tags.len(), "No tags survived sanitizing, using fallback");
        tags.push(FALLBACK_STYLE_TAG.to_string());
    }

    tags
}

fn keep_tag(tag: &str, upper_query: &str) -> bool {
    let upper_tag = tag.trim().to_uppercase();

    if upper_tag.is_empty() {
        return false;
    }
    if TAG_BLACKLIST.contains(&upper_tag.as_str()) {
        return false;
    }
    if upper_tag == upper_query {
        return false;
    }
    if upper_tag.chars().count() > NAME_FRAGMENT_MIN_LEN && upper_query.contains(&upper_tag) {
        return false;
    }
    if upper_tag.contains("WIKIPEDIA") {
        return false;
    }
    true
}
