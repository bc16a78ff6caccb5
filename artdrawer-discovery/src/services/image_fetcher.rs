//! Offline image capture
//!
//! Downloads an artwork image and inlines it as a `data:` URI so a collected artist can
//! be shown without network access.

use base64::{engine::general_purpose, Engine as _};
use std::time::Duration;

use crate::types::{ImageFetchError, ImageFetcher};

const USER_AGENT: &str = concat!("ArtDrawer/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP image fetcher
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, ImageFetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ImageFetchError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_data_uri(&self, url: &str) -> Result<String, ImageFetchError> {
        tracing::debug!(url = %url, "Downloading image for offline use");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageFetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status.as_u16()));
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_default();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageFetchError::Network(e.to_string()))?;

        encode_data_uri(&mime, &bytes)
    }
}

/// `data:<mime>;base64,<payload>`; rejects non-image content types
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> Result<String, ImageFetchError> {
    if !mime.starts_with("image/") {
        return Err(ImageFetchError::NotAnImage(mime.to_string()));
    }
    Ok(format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes)))
}
