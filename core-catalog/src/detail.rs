//! Character detail controller
//!
//! Favorite toggling for one character plus two "related characters"
//! lists computed from unfiltered list pages.

use std::sync::Arc;

use bridge_traits::favorites::{FavoriteRecord, FavoritesStore};
use core_api::{Character, CharacterApi, CharacterQuery};
use core_async::sync::{watch, CancellationToken, DropGuard};
use tracing::{debug, info, instrument, warn};

use crate::cursor::extract_page_number;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct RelatedConfig {
    /// Upper bound on pages scanned for episode-related characters
    pub episode_pages: u32,
    /// Maximum number of episode-related characters kept
    pub episode_limit: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            episode_pages: 3,
            episode_limit: 6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSnapshot {
    pub is_favorite: bool,
    /// Characters currently in the same location, first page only
    pub related_by_location: Vec<Character>,
    /// Characters with at least one episode, excluding this one
    pub related_by_episode: Vec<Character>,
    pub is_loading_related: bool,
}

pub struct CharacterDetailController {
    character: Character,
    api: Arc<dyn CharacterApi>,
    favorites: Arc<dyn FavoritesStore>,
    config: RelatedConfig,
    cancel: CancellationToken,
    state_tx: watch::Sender<DetailSnapshot>,
    _guard: DropGuard,
}

impl CharacterDetailController {
    /// Build the controller, reading the initial favorite flag from the store.
    ///
    /// A failing store reads as "not a favorite".
    pub async fn new(
        character: Character,
        api: Arc<dyn CharacterApi>,
        favorites: Arc<dyn FavoritesStore>,
        config: RelatedConfig,
    ) -> Self {
        let is_favorite = match favorites.is_favorite(character.id).await {
            Ok(flag) => flag,
            Err(error) => {
                warn!(id = character.id, error = %error, "Failed to read favorite flag");
                false
            }
        };

        let cancel = CancellationToken::new();
        let (state_tx, _) = watch::channel(DetailSnapshot {
            is_favorite,
            ..DetailSnapshot::default()
        });

        Self {
            character,
            api,
            favorites,
            config,
            _guard: cancel.clone().drop_guard(),
            cancel,
            state_tx,
        }
    }

    /// Fetch the character by id, then build the controller as [`Self::new`] does.
    #[instrument(skip(api, favorites, config, cancel))]
    pub async fn open(
        id: u32,
        api: Arc<dyn CharacterApi>,
        favorites: Arc<dyn FavoritesStore>,
        config: RelatedConfig,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let character = api.get_character(id, cancel).await?;
        Ok(Self::new(character, api, favorites, config).await)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn is_favorite(&self) -> bool {
        self.state_tx.borrow().is_favorite
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.state_tx.subscribe()
    }

    /// Remove the character from favorites if present, add it otherwise.
    ///
    /// Returns the new flag. The flag is left untouched when the store fails.
    #[instrument(skip(self), fields(id = self.character.id))]
    pub async fn toggle_favorite(&self) -> Result<bool> {
        let id = self.character.id;
        let now_favorite = if self.favorites.is_favorite(id).await? {
            self.favorites.remove(id).await?;
            false
        } else {
            self.favorites
                .add(FavoriteRecord::from(&self.character))
                .await?;
            true
        };

        info!(now_favorite, "Favorite toggled");
        self.state_tx
            .send_modify(|state| state.is_favorite = now_favorite);
        Ok(now_favorite)
    }

    /// Fetch both related lists concurrently. Fetch errors yield empty lists.
    #[instrument(skip(self), fields(id = self.character.id))]
    pub async fn load_related(&self) {
        self.state_tx
            .send_modify(|state| state.is_loading_related = true);

        let (by_location, by_episode) =
            core_async::task::join!(self.related_by_location(), self.related_by_episode());

        debug!(
            by_location = by_location.len(),
            by_episode = by_episode.len(),
            "Related characters loaded"
        );
        self.state_tx.send_modify(|state| {
            state.related_by_location = by_location;
            state.related_by_episode = by_episode;
            state.is_loading_related = false;
        });
    }

    async fn related_by_location(&self) -> Vec<Character> {
        match self
            .api
            .list_characters(&CharacterQuery::page(1), &self.cancel)
            .await
        {
            Ok(page) => page
                .results
                .into_iter()
                .filter(|c| c.location.name == self.character.location.name)
                .filter(|c| c.id != self.character.id)
                .collect(),
            Err(error) => {
                warn!(error = %error, "Failed to load characters by location");
                Vec::new()
            }
        }
    }

    async fn related_by_episode(&self) -> Vec<Character> {
        let mut scanned = Vec::new();
        let mut page = Some(1);

        while let Some(current) = page.filter(|p| *p <= self.config.episode_pages) {
            match self
                .api
                .list_characters(&CharacterQuery::page(current), &self.cancel)
                .await
            {
                Ok(result) => {
                    page = extract_page_number(result.info.next.as_deref());
                    scanned.extend(result.results);
                }
                Err(error) => {
                    warn!(error = %error, page = current, "Failed to load characters by episode");
                    return Vec::new();
                }
            }
        }

        scanned
            .into_iter()
            .filter(|c| c.id != self.character.id && !c.episode_urls.is_empty())
            .take(self.config.episode_limit)
            .collect()
    }
}
