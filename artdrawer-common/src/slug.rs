//! Stable artist id derivation
//!
//! Repeated searches for the same spelling must land on the same registry entry, so the
//! artist id is a pure function of the query text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix applied to every query-derived artist id
pub const ARTIST_ID_PREFIX: &str = "art-";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\-]+").expect("valid regex"));
static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Lowercase slug: whitespace runs become `-`, characters other than Unicode letters,
/// digits, `_` and `-` are dropped, dash runs collapse, and leading/trailing dashes are
/// trimmed.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&dashed, "");
    let collapsed = DASH_RUN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// `art-<slug>` id for a search query
///
/// A query with no letters or digits at all slugs to nothing; its trimmed UTF-8 bytes
/// are hex-encoded behind an extra `-`, which no slug can start with.
pub fn stable_artist_id(query: &str) -> String {
    let slug = slugify(query);
    if slug.is_empty() {
        let hex: String = query.trim().bytes().map(|b| format!("{:02x}", b)).collect();
        return format!("{}-{}", ARTIST_ID_PREFIX, hex);
    }
    format!("{}{}", ARTIST_ID_PREFIX, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Frida Kahlo"), "frida-kahlo");
        assert_eq!(slugify("  Jean-Michel   Basquiat "), "jean-michel-basquiat");
    }

    #[test]
    fn test_slugify_drops_punctuation_and_collapses_dashes() {
        assert_eq!(slugify("Salvador Dalí!"), "salvador-dalí");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("---x---"), "x");
    }

    #[test]
    fn test_stable_id_is_deterministic_per_spelling() {
        assert_eq!(stable_artist_id("Yayoi Kusama"), "art-yayoi-kusama");
        assert_eq!(stable_artist_id("Yayoi Kusama"), stable_artist_id("yayoi  kusama"));
        assert_ne!(stable_artist_id("Kusama"), stable_artist_id("Yayoi Kusama"));
    }

    #[test]
    fn test_non_latin_queries_get_distinct_ids() {
        assert_eq!(stable_artist_id("草间弥生"), "art-草间弥生");
        assert_ne!(stable_artist_id("草间弥生"), stable_artist_id("蔡国强"));
        assert_eq!(slugify("Марк Шагал"), "марк-шагал");
    }

    #[test]
    fn test_symbol_only_queries_fall_back_to_hex() {
        assert_eq!(stable_artist_id("!!"), "art--2121");
        assert_ne!(stable_artist_id("!!"), stable_artist_id("2121"));
        assert_ne!(stable_artist_id("!!"), stable_artist_id("??"));
        assert_eq!(stable_artist_id(" !! "), stable_artist_id("!!"));
    }
}
