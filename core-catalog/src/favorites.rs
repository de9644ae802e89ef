//! Favorites list controller

use std::sync::Arc;

use bridge_traits::favorites::{FavoriteRecord, FavoritesStore};
use core_api::{Gender, Status};
use core_async::sync::watch;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::Result;

/// A stored favorite with its labels parsed back into enums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteCharacter {
    pub id: u32,
    pub name: String,
    pub status: Status,
    pub gender: Gender,
    pub species: String,
    pub image_url: String,
    pub location_name: String,
}

impl From<FavoriteRecord> for FavoriteCharacter {
    fn from(record: FavoriteRecord) -> Self {
        Self {
            id: record.id,
            status: Status::from_label(&record.status),
            gender: Gender::from_label(&record.gender),
            name: record.name,
            species: record.species,
            image_url: record.image_url,
            location_name: record.location_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavoritesSnapshot {
    /// Sorted by name, case-insensitive
    pub items: Vec<FavoriteCharacter>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

pub struct FavoritesController {
    store: Arc<dyn FavoritesStore>,
    state_tx: watch::Sender<FavoritesSnapshot>,
}

impl FavoritesController {
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        let (state_tx, _) = watch::channel(FavoritesSnapshot::default());
        Self { store, state_tx }
    }

    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.state_tx.subscribe()
    }

    /// Reload every favorite from the store.
    ///
    /// On failure the previous items stay and `error_message` is set.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.state_tx.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });

        match self.store.list_all().await {
            Ok(records) => {
                let mut items: Vec<FavoriteCharacter> =
                    records.into_iter().map(FavoriteCharacter::from).collect();
                items.sort_by_cached_key(|item| item.name.to_lowercase());
                debug!(count = items.len(), "Favorites loaded");

                self.state_tx.send_modify(|state| {
                    state.items = items;
                    state.is_loading = false;
                });
            }
            Err(error) => {
                warn!(error = %error, "Failed to load favorites");
                self.state_tx.send_modify(|state| {
                    state.is_loading = false;
                    state.error_message = Some(error.to_string());
                });
            }
        }
    }

    /// Remove a favorite from the store and from the list.
    ///
    /// The list is left as is and `error_message` is set when the store fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: u32) -> Result<()> {
        if let Err(error) = self.store.remove(id).await {
            warn!(error = %error, "Failed to remove favorite");
            self.state_tx
                .send_modify(|state| state.error_message = Some(error.to_string()));
            return Err(error.into());
        }

        self.state_tx
            .send_modify(|state| state.items.retain(|item| item.id != id));
        Ok(())
    }
}
