//! Collection store: artist registry, drawers (categories) and favorites
//!
//! The three collections are held in memory behind one lock and written through to
//! the local database in full on every change. While a non-demo user is signed in,
//! each change is also mirrored to the remote document as a field-level merge.
//! Remote failures are logged and never fail the local operation.

use artdrawer_common::{time, uuid_utils, Artist, Bilingual, Category, CollectionItem, Error, Identity, Result};
use rand::seq::SliceRandom;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::db::collections::{self, CATEGORIES_KEY, FAVORITES_KEY, REGISTRY_KEY};
use crate::services::connectivity::Connectivity;
use crate::services::session::Session;
use crate::types::{ImageFetcher, RemoteDocumentStore, UserDocument};

/// Drawer colors offered for new categories
pub const PALETTE: [&str; 8] = [
    "#FFDE59", "#5454FF", "#FF1694", "#00D1FF", "#00FF41", "#FF7F00", "#B026FF", "#FF3131",
];

const PLACEHOLDER_NAME_EN: &str = "Saved Artist";
const PLACEHOLDER_NAME_CN: &str = "已收藏";

/// Drawers present in a fresh store
pub fn initial_categories() -> Vec<Category> {
    vec![
        Category::new("cat1", "Painting (油画)", "#FFDE59"),
        Category::new("cat2", "Installation (装置)", "#5454FF"),
        Category::new("cat3", "Surrealism (超现实)", "#FF1694"),
        Category::new("cat4", "Pop Art (波普)", "#00D1FF"),
    ]
}

/// One entry of a drawer listing
///
/// Favorites whose artist is missing from the registry still show up, as a
/// placeholder carrying only the id and a generic name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DrawerEntry {
    Artist(Box<Artist>),
    Placeholder { id: String, name: Bilingual },
}

/// Category with the number of artists it holds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawerSummary {
    #[serde(flatten)]
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Default)]
struct CollectionState {
    categories: Vec<Category>,
    favorites: Vec<CollectionItem>,
    registry: HashMap<String, Artist>,
}

impl CollectionState {
    fn category(&self, id: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))
    }

    fn is_collected(&self, artist_id: &str, category_id: &str) -> bool {
        self.favorites.iter().any(|f| f.matches(artist_id, category_id))
    }

    /// `cat-<millis>`, bumped past any id already taken
    fn next_category_id(&self) -> String {
        let mut millis = time::now_millis();
        loop {
            let id = format!("cat-{}", millis);
            if self.categories.iter().all(|c| c.id != id) {
                return id;
            }
            millis += 1;
        }
    }
}

pub struct CollectionStore {
    db: SqlitePool,
    state: RwLock<CollectionState>,
    images: Arc<dyn ImageFetcher>,
    remote: Option<Arc<dyn RemoteDocumentStore>>,
    connectivity: Arc<Connectivity>,
    session: Arc<Session>,
    collect_gate: Mutex<()>,
}

impl CollectionStore {
    /// Load all three collections from the database, seeding the initial drawers
    /// on first run
    pub async fn load(
        db: SqlitePool,
        images: Arc<dyn ImageFetcher>,
        remote: Option<Arc<dyn RemoteDocumentStore>>,
        connectivity: Arc<Connectivity>,
        session: Arc<Session>,
    ) -> Result<Self> {
        let categories = match collections::load::<Vec<Category>>(&db, CATEGORIES_KEY).await? {
            Some(categories) => categories,
            None => {
                let seeded = initial_categories();
                collections::save(&db, CATEGORIES_KEY, &seeded).await?;
                tracing::info!(count = seeded.len(), "Seeded initial drawers");
                seeded
            }
        };
        let favorites: Vec<CollectionItem> = collections::load(&db, FAVORITES_KEY).await?.unwrap_or_default();
        let registry: HashMap<String, Artist> = collections::load(&db, REGISTRY_KEY).await?.unwrap_or_default();

        tracing::info!(
            categories = categories.len(),
            favorites = favorites.len(),
            registry = registry.len(),
            "Collection store loaded"
        );

        Ok(Self {
            db,
            state: RwLock::new(CollectionState {
                categories,
                favorites,
                registry,
            }),
            images,
            remote,
            connectivity,
            session,
            collect_gate: Mutex::new(()),
        })
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.categories.clone()
    }

    pub async fn favorites(&self) -> Vec<CollectionItem> {
        self.state.read().await.favorites.clone()
    }

    pub async fn artist(&self, artist_id: &str) -> Option<Artist> {
        self.state.read().await.registry.get(artist_id).cloned()
    }

    pub async fn drawers(&self) -> Vec<DrawerSummary> {
        let state = self.state.read().await;
        state
            .categories
            .iter()
            .map(|category| DrawerSummary {
                category: category.clone(),
                count: state.favorites.iter().filter(|f| f.category == category.id).count(),
            })
            .collect()
    }

    /// Artists in one drawer, resolved through the registry
    pub async fn drawer_items(&self, category_id: &str) -> Result<Vec<DrawerEntry>> {
        let state = self.state.read().await;
        state.category(category_id)?;

        Ok(state
            .favorites
            .iter()
            .filter(|f| f.category == category_id)
            .map(|f| match state.registry.get(&f.artist_id) {
                Some(artist) => DrawerEntry::Artist(Box::new(artist.clone())),
                None => DrawerEntry::Placeholder {
                    id: f.artist_id.clone(),
                    name: Bilingual::new(PLACEHOLDER_NAME_EN, PLACEHOLDER_NAME_CN),
                },
            })
            .collect())
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    /// Create a drawer; the color defaults to a random palette entry
    pub async fn add_category(&self, name: &str, color: Option<String>) -> Result<Category> {
        let name = clean_name(name)?;
        let color = color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(random_palette_color);

        let (created, categories) = {
            let mut state = self.state.write().await;
            let created = Category::new(state.next_category_id(), name, color);

            let mut categories = state.categories.clone();
            categories.push(created.clone());
            collections::save(&self.db, CATEGORIES_KEY, &categories).await?;

            state.categories = categories.clone();
            (created, categories)
        };

        tracing::info!(category_id = %created.id, name = %created.name, "Created drawer");

        self.mirror(UserDocument {
            categories: Some(categories),
            ..Default::default()
        })
        .await;

        Ok(created)
    }

    /// Rename and/or recolor a drawer
    pub async fn update_category(&self, id: &str, name: &str, color: Option<String>) -> Result<Category> {
        let name = clean_name(name)?;

        let (updated, categories) = {
            let mut state = self.state.write().await;
            let mut categories = state.categories.clone();
            let category = categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::NotFound(format!("category {}", id)))?;

            category.name = name;
            if let Some(color) = color.filter(|c| !c.trim().is_empty()) {
                category.color = color;
            }
            let updated = category.clone();

            collections::save(&self.db, CATEGORIES_KEY, &categories).await?;
            state.categories = categories.clone();
            (updated, categories)
        };

        tracing::info!(category_id = %id, "Updated drawer");

        self.mirror(UserDocument {
            categories: Some(categories),
            ..Default::default()
        })
        .await;

        Ok(updated)
    }

    /// Remove a drawer together with every favorite filed under it
    ///
    /// Both collections are persisted in one transaction.
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let (categories, favorites, removed) = {
            let mut state = self.state.write().await;
            state.category(id)?;

            let categories: Vec<Category> = state.categories.iter().filter(|c| c.id != id).cloned().collect();
            let favorites: Vec<CollectionItem> =
                state.favorites.iter().filter(|f| f.category != id).cloned().collect();
            let removed = state.favorites.len() - favorites.len();

            collections::save_pair(&self.db, (CATEGORIES_KEY, &categories), (FAVORITES_KEY, &favorites)).await?;

            state.categories = categories.clone();
            state.favorites = favorites.clone();
            (categories, favorites, removed)
        };

        tracing::info!(category_id = %id, removed_items = removed, "Deleted drawer");

        self.mirror(UserDocument {
            categories: Some(categories),
            favorites: Some(favorites),
            ..Default::default()
        })
        .await;

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Membership and registry
    // ------------------------------------------------------------------------

    /// Flip membership of an artist in a drawer; returns whether it is now collected
    pub async fn toggle_membership(&self, artist_id: &str, category_id: &str) -> Result<bool> {
        let (collected, favorites) = {
            let mut state = self.state.write().await;
            state.category(category_id)?;

            let collected = !state.is_collected(artist_id, category_id);
            let mut favorites = state.favorites.clone();
            set_membership(&mut favorites, artist_id, category_id, collected);
            collections::save(&self.db, FAVORITES_KEY, &favorites).await?;

            state.favorites = favorites.clone();
            (collected, favorites)
        };

        tracing::info!(artist_id = %artist_id, category_id = %category_id, collected, "Toggled membership");

        self.mirror(UserDocument {
            favorites: Some(favorites),
            ..Default::default()
        })
        .await;

        Ok(collected)
    }

    /// Record the full artist and flip its membership in a drawer
    ///
    /// When the artist is being added, has no offline image and the service is online,
    /// the primary artwork is captured first. Capture is best-effort.
    ///
    /// Collects run one at a time, so the add/remove decision taken before the capture
    /// is still the one applied when the registry and favorites are written.
    pub async fn collect(&self, mut artist: Artist, category_id: &str) -> Result<bool> {
        let _gate = self.collect_gate.lock().await;

        let adding = {
            let state = self.state.read().await;
            state.category(category_id)?;
            !state.is_collected(&artist.id, category_id)
        };

        if adding && artist.offline_image.is_none() && self.connectivity.is_online() {
            if let Some(url) = artist.primary_artwork_url() {
                match self.images.fetch_data_uri(url).await {
                    Ok(data_uri) => artist.offline_image = Some(data_uri),
                    Err(e) => {
                        tracing::warn!(artist_id = %artist.id, error = %e, "Offline image capture failed")
                    }
                }
            }
        }

        let artist_id = artist.id.clone();
        let (registry, favorites) = {
            let mut state = self.state.write().await;
            state.category(category_id)?;

            let mut registry = state.registry.clone();
            registry.insert(artist_id.clone(), artist);
            let mut favorites = state.favorites.clone();
            set_membership(&mut favorites, &artist_id, category_id, adding);

            collections::save_pair(&self.db, (REGISTRY_KEY, &registry), (FAVORITES_KEY, &favorites)).await?;

            state.registry = registry.clone();
            state.favorites = favorites.clone();
            (registry, favorites)
        };

        tracing::info!(artist_id = %artist_id, category_id = %category_id, collected = adding, "Collected artist");

        self.mirror(UserDocument {
            registry: Some(registry),
            favorites: Some(favorites),
            ..Default::default()
        })
        .await;

        Ok(adding)
    }

    /// Store the latest full record for an artist (overwrites by id)
    pub async fn upsert_artist(&self, artist: Artist) -> Result<()> {
        let registry = {
            let mut state = self.state.write().await;
            let mut registry = state.registry.clone();
            registry.insert(artist.id.clone(), artist);
            collections::save(&self.db, REGISTRY_KEY, &registry).await?;

            state.registry = registry.clone();
            registry
        };

        self.mirror(UserDocument {
            registry: Some(registry),
            ..Default::default()
        })
        .await;

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------------

    /// Sign in and reconcile with the remote document
    ///
    /// An existing remote document replaces local drawers and favorites (when present)
    /// and its registry entries win over local ones. Without a remote document the whole
    /// local state is pushed. The demo identity skips remote sync entirely.
    pub async fn sign_in(&self, identity: Identity) -> Result<()> {
        let uid = identity.uid.clone();
        let demo = identity.is_demo();
        self.session.sign_in(identity).await;

        let Some(remote) = self.remote.clone().filter(|_| !demo) else {
            return Ok(());
        };

        match remote.fetch(&uid).await {
            Ok(Some(document)) => self.adopt_remote(document).await,
            Ok(None) => {
                let document = self.local_document().await;
                if let Err(e) = remote.merge(&uid, &document).await {
                    tracing::warn!(uid = %uid, error = %e, "Initial remote push failed");
                } else {
                    tracing::info!(uid = %uid, "Pushed local collection to new remote document");
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(uid = %uid, error = %e, "Remote fetch failed, keeping local collection");
                Ok(())
            }
        }
    }

    pub async fn sign_out(&self) {
        self.session.sign_out().await;
    }

    async fn adopt_remote(&self, document: UserDocument) -> Result<()> {
        let mut state = self.state.write().await;

        let categories = document.categories.unwrap_or_else(|| state.categories.clone());
        let favorites = document.favorites.unwrap_or_else(|| state.favorites.clone());
        let mut registry = state.registry.clone();
        if let Some(remote_registry) = document.registry {
            registry.extend(remote_registry);
        }

        collections::save_all(
            &self.db,
            (CATEGORIES_KEY, &categories),
            (FAVORITES_KEY, &favorites),
            (REGISTRY_KEY, &registry),
        )
        .await?;

        tracing::info!(
            categories = categories.len(),
            favorites = favorites.len(),
            registry = registry.len(),
            "Adopted remote collection"
        );

        *state = CollectionState {
            categories,
            favorites,
            registry,
        };

        Ok(())
    }

    async fn local_document(&self) -> UserDocument {
        let state = self.state.read().await;
        UserDocument {
            favorites: Some(state.favorites.clone()),
            categories: Some(state.categories.clone()),
            registry: Some(state.registry.clone()),
        }
    }

    async fn mirror(&self, patch: UserDocument) {
        let Some(remote) = &self.remote else {
            return;
        };
        let Some(uid) = self.session.sync_uid().await else {
            return;
        };
        if let Err(e) = remote.merge(&uid, &patch).await {
            tracing::warn!(uid = %uid, error = %e, "Remote mirror failed");
        }
    }
}

/// Add or remove the (artist, drawer) pair so that its presence matches `present`
fn set_membership(favorites: &mut Vec<CollectionItem>, artist_id: &str, category_id: &str, present: bool) {
    let existing = favorites.iter().position(|f| f.matches(artist_id, category_id));
    match (existing, present) {
        (Some(pos), false) => {
            favorites.remove(pos);
        }
        (None, true) => favorites.push(CollectionItem {
            id: uuid_utils::generate_string(),
            artist_id: artist_id.to_string(),
            category: category_id.to_string(),
        }),
        _ => {}
    }
}

fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("drawer name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn random_palette_color() -> String {
    PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PALETTE[0])
        .to_string()
}
