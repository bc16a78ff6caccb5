//! Signed-in identity

use artdrawer_common::Identity;
use tokio::sync::RwLock;

/// Current user; `None` when signed out
#[derive(Debug, Default)]
pub struct Session {
    identity: RwLock<Option<Identity>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    /// Uid of the signed-in user when their changes should be mirrored remotely
    ///
    /// The demo identity is never synced.
    pub async fn sync_uid(&self) -> Option<String> {
        self.identity
            .read()
            .await
            .as_ref()
            .filter(|identity| !identity.is_demo())
            .map(|identity| identity.uid.clone())
    }

    pub async fn sign_in(&self, identity: Identity) {
        tracing::info!(uid = %identity.uid, demo = identity.is_demo(), "User signed in");
        *self.identity.write().await = Some(identity);
    }

    pub async fn sign_out(&self) {
        if let Some(identity) = self.identity.write().await.take() {
            tracing::info!(uid = %identity.uid, "User signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_identity_is_not_synced() {
        let session = Session::new();
        assert!(session.sync_uid().await.is_none());

        session.sign_in(Identity::demo()).await;
        assert!(session.current().await.is_some());
        assert!(session.sync_uid().await.is_none());

        session
            .sign_in(Identity {
                uid: "u-42".to_string(),
                display_name: None,
                photo_url: None,
            })
            .await;
        assert_eq!(session.sync_uid().await.as_deref(), Some("u-42"));

        session.sign_out().await;
        assert!(session.current().await.is_none());
    }
}
