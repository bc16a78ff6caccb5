//! Generative enrichment client (Gemini `generateContent` REST API)
//!
//! Two uses:
//! - structured profile enrichment, requested as JSON against a response schema
//! - free-text historian chat

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::types::{EnrichmentError, EnrichmentPayload, EnrichmentProvider, EnrichmentRequest};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const USER_AGENT: &str = concat!("ArtDrawer/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

const HISTORIAN_INSTRUCTION: &str =
    "You are a world-class art historian. Provide concise, expert insights.";
const CHAT_TEMPERATURE: f32 = 0.7;

/// `generateContent` response (subset)
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Gemini REST client
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    profile_model: String,
    chat_model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        profile_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        Self::with_base_url(GEMINI_BASE_URL, api_key, profile_model, chat_model)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        profile_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
            profile_model: profile_model.into(),
            chat_model: chat_model.into(),
        })
    }

    async fn generate(&self, model: &str, body: &Value) -> Result<String, EnrichmentError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EnrichmentError::NotConfigured("missing API key".to_string()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model = %model, "Calling generateContent");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(body)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentError::MalformedPayload(e.to_string()))?;

        extract_text(parsed).ok_or(EnrichmentError::EmptyResponse)
    }
}

#[async_trait::async_trait]
impl EnrichmentProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn enrich(&self, request: &EnrichmentRequest) -> Result<EnrichmentPayload, EnrichmentError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": build_profile_prompt(request)}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": profile_schema(),
            }
        });

        let text = self.generate(&self.profile_model, &body).await?;
        let payload = parse_payload(&text)?;

        tracing::info!(
            query = %request.query,
            has_metadata = payload.artworks_metadata.is_some(),
            "Received enrichment payload"
        );

        Ok(payload)
    }

    async fn ask(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "systemInstruction": {"parts": [{"text": HISTORIAN_INSTRUCTION}]},
            "generationConfig": {"temperature": CHAT_TEMPERATURE}
        });

        self.generate(&self.chat_model, &body).await
    }
}

/// Prompt for structured profile enrichment
pub fn build_profile_prompt(request: &EnrichmentRequest) -> String {
    let artwork_context = if request.artwork_titles.is_empty() {
        String::new()
    } else {
        let titles = serde_json::to_string(&request.artwork_titles).unwrap_or_default();
        format!(
            "Additionally, I found images with these titles: {}. For the 'artworksMetadata' field, \
             try to identify the Name, Year, and Media for these specific {} artworks in order. \
             If the title is vague, provide the most likely famous work that matches or just clean up the title.",
            titles,
            request.artwork_titles.len()
        )
    };

    format!(
        "Search Result for \"{}\": {}\n\n{}\n\nBased on this, generate a structured artist profile in JSON format. \
         Provide specific art movements, materials, media, and recurring themes as tags. \
         Also provide a comprehensive introductory biography in both English and Chinese.",
        request.query, request.snippet, artwork_context
    )
}

/// Response schema for structured profile enrichment
fn profile_schema() -> Value {
    let string = json!({"type": "STRING"});
    let string_list = |description: &str| {
        json!({"type": "ARRAY", "items": {"type": "STRING"}, "description": description})
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "nameCN": string,
            "introEN": {"type": "STRING", "description": "A detailed introductory biography in English (approx 100-150 words)."},
            "introCN": {"type": "STRING", "description": "A detailed introductory biography in Chinese (approx 100-150 words)."},
            "movements": string_list("Art movements or genres (e.g. Impressionism)"),
            "materials": string_list("Materials used (e.g. Oil on Canvas)"),
            "themes": string_list("Recurring themes in their work"),
            "mediaTags": string_list("Media the artist works in (e.g. Painting, Installation)"),
            "visualElements": string_list("Characteristic visual elements"),
            "techniquesEN": string,
            "techniquesCN": string,
            "artworksMetadata": {
                "type": "ARRAY",
                "description": "Metadata for the detected artworks in order.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": string,
                        "year": string,
                        "media": string
                    }
                }
            }
        },
        "required": ["nameCN", "introEN", "introCN", "movements", "materials", "themes", "mediaTags", "visualElements"]
    })
}

/// Concatenated text parts of the first candidate
pub fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse enrichment JSON, tolerating a Markdown code fence around it
pub fn parse_payload(text: &str) -> Result<EnrichmentPayload, EnrichmentError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(|e| EnrichmentError::MalformedPayload(e.to_string()))
}
