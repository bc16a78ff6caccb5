//! Artist, artwork and drawer models
//!
//! Field names serialize in camelCase so that persisted collections and API payloads
//! match what the browser front end reads and writes.

use serde::{Deserialize, Serialize};

/// Sentinel year for artworks whose year could not be determined
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// Uid of the built-in demo curator (never synced remotely)
pub const DEMO_UID: &str = "demo-user-123";

/// English/Chinese text pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    pub en: String,
    pub cn: String,
}

impl Bilingual {
    pub fn new(en: impl Into<String>, cn: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            cn: cn.into(),
        }
    }
}

/// A single artwork image attached to an artist profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Image URL
    pub url: String,
    pub title: String,
    /// Four-digit year, or [`UNKNOWN_YEAR`]
    pub year: String,
    pub media: String,
}

/// External resource link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Canonical enriched artist record
///
/// Produced by the profile assembler and stored in the artist registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Stable id derived from the query text (see [`crate::slug::stable_artist_id`])
    pub id: String,
    pub name: Bilingual,
    pub intro: Bilingual,
    pub artworks: Vec<Artwork>,
    /// `data:` URI of the primary artwork, cached when collected while online
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_image: Option<String>,
    /// Sanitized style tags (1..=10 entries)
    pub style: Vec<String>,
    pub media: Vec<String>,
    pub links: Vec<Link>,
    pub visual_elements: Vec<String>,
    pub cultural_background: Bilingual,
    pub techniques: Bilingual,
}

impl Artist {
    /// Primary artwork URL, if any
    pub fn primary_artwork_url(&self) -> Option<&str> {
        self.artworks.first().map(|a| a.url.as_str())
    }
}

/// User-defined drawer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// `cat-<unix millis>` for user-created drawers
    pub id: String,
    pub name: String,
    /// CSS color, e.g. `#FFDE59`
    pub color: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Membership of an artist in a drawer
///
/// At most one item exists per `(artist_id, category)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: String,
    pub artist_id: String,
    /// Category id
    pub category: String,
}

impl CollectionItem {
    pub fn matches(&self, artist_id: &str, category_id: &str) -> bool {
        self.artist_id == artist_id && self.category == category_id
    }
}

/// Signed-in user identity handed over by the front end's auth flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

impl Identity {
    /// The demo curator used when real sign-in is unavailable
    pub fn demo() -> Self {
        Self {
            uid: DEMO_UID.to_string(),
            display_name: Some("Demo Curator".to_string()),
            photo_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Curator".to_string()),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.uid == DEMO_UID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_artist() -> Artist {
        Artist {
            id: "art-frida-kahlo".to_string(),
            name: Bilingual::new("FRIDA KAHLO", "弗里达·卡罗"),
            intro: Bilingual::new("Mexican painter.", "墨西哥画家。"),
            artworks: vec![Artwork {
                url: "https://img.example/1.jpg".to_string(),
                title: "The Two Fridas".to_string(),
                year: "1939".to_string(),
                media: "Oil on canvas".to_string(),
            }],
            offline_image: None,
            style: vec!["Surrealism".to_string()],
            media: vec!["Oil".to_string()],
            links: vec![Link::new("FRIDAKAHLO.ORG", "https://fridakahlo.org")],
            visual_elements: vec!["Self-portrait".to_string()],
            cultural_background: Bilingual::new("Mexican painter.", "实时数据获取中"),
            techniques: Bilingual::new("Oil", "油画"),
        }
    }

    #[test]
    fn test_artist_serializes_camel_case_without_offline_image() {
        let value = serde_json::to_value(sample_artist()).unwrap();
        assert!(value.get("visualElements").is_some());
        assert!(value.get("culturalBackground").is_some());
        assert!(value.get("offlineImage").is_none());
    }

    #[test]
    fn test_artist_reads_front_end_payload() {
        let payload = json!({
            "id": "art-banksy",
            "name": {"en": "BANKSY", "cn": "班克斯"},
            "intro": {"en": "Street artist", "cn": "街头艺术家"},
            "artworks": [],
            "offlineImage": "data:image/png;base64,AAAA",
            "style": ["Street Art"],
            "media": ["Spray paint"],
            "links": [],
            "visualElements": ["Stencil"],
            "culturalBackground": {"en": "UK", "cn": "英国"},
            "techniques": {"en": "Stencil", "cn": "模板"}
        });
        let artist: Artist = serde_json::from_value(payload).unwrap();
        assert_eq!(artist.offline_image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(artist.primary_artwork_url(), None);
    }

    #[test]
    fn test_collection_item_uses_artist_id_key() {
        let item = CollectionItem {
            id: "1".to_string(),
            artist_id: "art-banksy".to_string(),
            category: "cat1".to_string(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["artistId"], "art-banksy");
        assert!(item.matches("art-banksy", "cat1"));
        assert!(!item.matches("art-banksy", "cat2"));
    }

    #[test]
    fn test_identity_field_names_and_demo() {
        let identity: Identity = serde_json::from_value(json!({
            "uid": "u-1",
            "displayName": "Curator",
            "photoURL": "https://example.com/p.png"
        }))
        .unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Curator"));
        assert!(!identity.is_demo());
        assert!(Identity::demo().is_demo());
    }
}
