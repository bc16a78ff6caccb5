//! Remote per-user document store
//!
//! Documents live at `<base_url>/users/<uid>`. `GET` returns the document (404 when
//! absent); `PATCH` merges the supplied top-level fields without touching the others.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::types::{RemoteDocumentStore, RemoteStoreError, UserDocument};

const USER_AGENT: &str = concat!("ArtDrawer/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP JSON document store client
pub struct HttpDocumentStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, RemoteStoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RemoteStoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn document_url(&self, uid: &str) -> Result<reqwest::Url, RemoteStoreError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| RemoteStoreError::Parse(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| RemoteStoreError::Parse("base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["users", uid]);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl RemoteDocumentStore for HttpDocumentStore {
    async fn fetch(&self, uid: &str) -> Result<Option<UserDocument>, RemoteStoreError> {
        let url = self.document_url(uid)?;
        tracing::debug!(uid = %uid, "Fetching remote user document");

        let response = self
            .authorize(self.http_client.get(url))
            .send()
            .await
            .map_err(|e| RemoteStoreError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteStoreError::Api(status.as_u16(), error_text));
        }

        let document = response
            .json()
            .await
            .map_err(|e| RemoteStoreError::Parse(e.to_string()))?;
        Ok(Some(document))
    }

    async fn merge(&self, uid: &str, patch: &UserDocument) -> Result<(), RemoteStoreError> {
        let url = self.document_url(uid)?;
        tracing::debug!(uid = %uid, "Merging remote user document");

        let response = self
            .authorize(self.http_client.patch(url))
            .json(patch)
            .send()
            .await
            .map_err(|e| RemoteStoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteStoreError::Api(status.as_u16(), error_text));
        }
        Ok(())
    }
}

/// Process-local document store with the same merge semantics
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, UserDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document for `uid`, if any
    pub async fn snapshot(&self, uid: &str) -> Option<UserDocument> {
        self.documents.read().await.get(uid).cloned()
    }
}

#[async_trait::async_trait]
impl RemoteDocumentStore for InMemoryDocumentStore {
    async fn fetch(&self, uid: &str) -> Result<Option<UserDocument>, RemoteStoreError> {
        Ok(self.snapshot(uid).await)
    }

    async fn merge(&self, uid: &str, patch: &UserDocument) -> Result<(), RemoteStoreError> {
        let mut documents = self.documents.write().await;
        let document = documents.entry(uid.to_string()).or_default();

        if let Some(favorites) = &patch.favorites {
            document.favorites = Some(favorites.clone());
        }
        if let Some(categories) = &patch.categories {
            document.categories = Some(categories.clone());
        }
        if let Some(registry) = &patch.registry {
            document.registry = Some(registry.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artdrawer_common::Category;

    #[test]
    fn test_document_url_escapes_uid() {
        let store = HttpDocumentStore::new("https://store.example.com/v1/", None).unwrap();
        let url = store.document_url("user/1").unwrap();
        assert_eq!(url.as_str(), "https://store.example.com/v1/users/user%2F1");
    }

    #[tokio::test]
    async fn test_in_memory_merge_is_field_by_field() {
        let store = InMemoryDocumentStore::new();
        assert!(store.fetch("u1").await.unwrap().is_none());

        store
            .merge(
                "u1",
                &UserDocument {
                    categories: Some(vec![Category::new("cat1", "Painting", "#FFDE59")]),
                    favorites: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .merge(
                "u1",
                &UserDocument {
                    registry: Some(HashMap::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let document = store.fetch("u1").await.unwrap().unwrap();
        assert_eq!(document.categories.unwrap().len(), 1);
        assert!(document.favorites.is_some());
        assert!(document.registry.is_some());
    }
}
