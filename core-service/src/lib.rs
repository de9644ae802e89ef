//! Core service façade and bootstrap helpers.
//!
//! This crate wires a [`CatalogConfig`] (host bridges plus tunables) into the
//! API client and hands out ready-to-use controllers for the list, detail
//! and favorites screens. Desktop apps typically enable the `desktop-shims`
//! feature, which lets [`bootstrap_desktop`] fill in the reqwest HTTP client
//! and the JSON favorites file.

pub mod error;

pub use error::{Result, ServiceError};

pub use core_api::{
    ApiError, Character, CharacterApi, CharacterQuery, Gender, Status, DEFAULT_BASE_URL,
};
pub use core_catalog::{
    CharacterDetailController, CharacterFilter, CharacterListController, DetailSnapshot,
    FavoriteCharacter, FavoritesController, FavoritesSnapshot, ListSnapshot, LoadState,
};
pub use core_runtime::{CatalogConfig, CatalogConfigBuilder};

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::{JsonFavoritesStore, MemoryFavoritesStore, ReqwestHttpClient};

use std::sync::Arc;

use core_api::{RequestBuilder, RetryingTransport, RickAndMortyClient};
use core_async::sync::CancellationToken;
use core_catalog::{ListConfig, RelatedConfig};
use tracing::{info, instrument};

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CatalogService {
    config: Arc<CatalogConfig>,
    api: Arc<dyn CharacterApi>,
}

impl CatalogService {
    /// Build the API client from `config`.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let mut builder =
            RequestBuilder::new(&config.base_url)?.with_timeout(config.request_timeout);
        for (key, value) in &config.default_headers {
            builder = builder.with_header(key.clone(), value.clone());
        }

        let transport =
            RetryingTransport::new(Arc::clone(&config.http_client), config.retry_policy.clone());
        let api: Arc<dyn CharacterApi> =
            Arc::new(RickAndMortyClient::with_parts(builder, transport));

        info!(base_url = %config.base_url, "Catalog service ready");
        Ok(Self::with_api(config, api))
    }

    /// Use a ready-made API implementation instead of the HTTP client.
    pub fn with_api(config: CatalogConfig, api: Arc<dyn CharacterApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn api(&self) -> Arc<dyn CharacterApi> {
        Arc::clone(&self.api)
    }

    /// A fresh list controller. Nothing is fetched until the host asks.
    pub fn characters(&self) -> CharacterListController {
        CharacterListController::new(
            self.api(),
            ListConfig {
                search_debounce: self.config.search_debounce,
            },
        )
    }

    pub async fn character_detail(&self, character: Character) -> CharacterDetailController {
        CharacterDetailController::new(
            character,
            self.api(),
            Arc::clone(&self.config.favorites_store),
            self.related_config(),
        )
        .await
    }

    /// Fetch a character by id and open its detail controller.
    #[instrument(skip(self, cancel))]
    pub async fn character_detail_by_id(
        &self,
        id: u32,
        cancel: &CancellationToken,
    ) -> Result<CharacterDetailController> {
        let detail = CharacterDetailController::open(
            id,
            self.api(),
            Arc::clone(&self.config.favorites_store),
            self.related_config(),
            cancel,
        )
        .await?;
        Ok(detail)
    }

    pub fn favorites(&self) -> FavoritesController {
        FavoritesController::new(Arc::clone(&self.config.favorites_store))
    }

    fn related_config(&self) -> RelatedConfig {
        RelatedConfig {
            episode_pages: self.config.related_episode_pages,
            episode_limit: self.config.related_episode_limit,
        }
    }
}

/// Build a service from environment overrides and desktop defaults.
///
/// ```no_run
/// # fn example() -> core_service::Result<()> {
/// let service = core_service::bootstrap_desktop()?;
/// let list = service.characters();
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop() -> Result<CatalogService> {
    let config = CatalogConfig::builder().from_env()?.build()?;
    CatalogService::new(config)
}
