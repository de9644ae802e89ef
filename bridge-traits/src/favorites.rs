//! Favorites Storage Abstraction
//!
//! Id-keyed store for characters the user marked as favorite. Hosts back it
//! with whatever persistence they have (Core Data, Room, a JSON file).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;

/// Snapshot of a character as persisted by the favorites store.
///
/// `status` and `gender` are stored as the API's wire labels ("Alive",
/// "unknown", ...) so the store stays independent of the core's enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub gender: String,
    pub species: String,
    pub image_url: String,
    pub location_name: String,
}

/// Favorites store trait
///
/// Adding an id that already exists replaces the stored record. Removing an
/// unknown id is not an error.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::favorites::FavoritesStore;
///
/// async fn toggle(store: &dyn FavoritesStore, record: FavoriteRecord) -> Result<bool> {
///     if store.is_favorite(record.id).await? {
///         store.remove(record.id).await?;
///         Ok(false)
///     } else {
///         store.add(record).await?;
///         Ok(true)
///     }
/// }
/// ```
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn is_favorite(&self, id: u32) -> Result<bool>;

    async fn add(&self, record: FavoriteRecord) -> Result<()>;

    async fn remove(&self, id: u32) -> Result<()>;

    async fn list_all(&self) -> Result<Vec<FavoriteRecord>>;

    /// Ids of every stored favorite
    async fn favorite_ids(&self) -> Result<HashSet<u32>> {
        Ok(self.list_all().await?.into_iter().map(|r| r.id).collect())
    }
}
