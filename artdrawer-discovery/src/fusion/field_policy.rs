//! Field fallback policy
//!
//! Each profile field has an ordered list of candidate sources and a non-empty default.
//! Blank strings and lists whose entries are all blank count as absent.

use artdrawer_common::Link;
use std::collections::HashSet;

/// Maximum number of external links on a profile
pub const MAX_LINKS: usize = 3;

/// First non-blank candidate, or `default`
pub fn pick_text(candidates: &[Option<&str>], default: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Non-blank entries of `candidate`, or `default` when none remain
pub fn pick_list(candidate: Option<&[String]>, default: &[&str]) -> Vec<String> {
    let values: Vec<String> = candidate
        .unwrap_or_default()
        .iter()
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .collect();

    if values.is_empty() {
        default.iter().map(|value| value.to_string()).collect()
    } else {
        values
    }
}

/// Link to a web search for `query`, used when no other link is known
pub fn search_fallback_link(query: &str) -> Link {
    let url = reqwest::Url::parse_with_params("https://www.google.com/search", &[("q", query)])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| "https://www.google.com/search".to_string());
    Link::new("GOOGLE SEARCH", url)
}

/// Deduplicate by url, cap at [`MAX_LINKS`], fall back to a search link
pub fn normalize_links(links: &[Link], query: &str) -> Vec<Link> {
    let mut seen = HashSet::new();
    let mut normalized: Vec<Link> = links
        .iter()
        .filter(|link| !link.url.trim().is_empty())
        .filter(|link| seen.insert(link.url.as_str()))
        .take(MAX_LINKS)
        .cloned()
        .collect();

    if normalized.is_empty() {
        normalized.push(search_fallback_link(query));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_text_skips_absent_and_blank() {
        assert_eq!(pick_text(&[None, Some("  "), Some("second")], "default"), "second");
        assert_eq!(pick_text(&[None, Some("")], "default"), "default");
        assert_eq!(pick_text(&[], "default"), "default");
    }

    #[test]
    fn test_pick_list_filters_blank_entries() {
        let values = vec!["".to_string(), "Oil".to_string()];
        assert_eq!(pick_list(Some(&values), &["Various"]), vec!["Oil"]);

        let blanks = vec![" ".to_string()];
        assert_eq!(pick_list(Some(&blanks), &["Various"]), vec!["Various"]);
        assert_eq!(pick_list(None, &["A", "B"]), vec!["A", "B"]);
    }

    #[test]
    fn test_normalize_links_dedup_and_cap() {
        let links = vec![
            Link::new("A", "https://a.example"),
            Link::new("A again", "https://a.example"),
            Link::new("B", "https://b.example"),
            Link::new("C", "https://c.example"),
            Link::new("D", "https://d.example"),
        ];
        let normalized = normalize_links(&links, "x");
        assert_eq!(normalized.len(), MAX_LINKS);
        assert_eq!(normalized[0].label, "A");
        assert_eq!(normalized[1].label, "B");
        assert_eq!(normalized[2].label, "C");
    }

    #[test]
    fn test_normalize_links_fallback() {
        let normalized = normalize_links(&[], "Frida Kahlo");
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].label, "GOOGLE SEARCH");
        assert_eq!(normalized[0].url, "https://www.google.com/search?q=Frida+Kahlo");
    }
}
