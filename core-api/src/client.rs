//! Rick and Morty API client
//!
//! Every operation follows the same pipeline: build the request, send it
//! through the retrying transport, validate the status, decode the body.
//! The client itself never retries and never caches.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, RetryPolicy};
use core_async::sync::CancellationToken;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::decode::decode_response;
use crate::endpoint::{Endpoint, RequestBuilder};
use crate::error::Result;
use crate::transport::RetryingTransport;
use crate::types::{Character, CharactersPage, Episode, Gender, Location, Status};

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Parameters of `GET /character`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterQuery {
    pub page: Option<u32>,
    pub name: Option<String>,
    pub status: Option<Status>,
    pub gender: Option<Gender>,
}

impl CharacterQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    /// Query parameters in wire order. Absent values and empty names are
    /// left out entirely rather than sent empty.
    pub fn query_items(&self) -> Vec<(String, String)> {
        let mut items = Vec::new();
        if let Some(page) = self.page {
            items.push(("page".to_string(), page.to_string()));
        }
        if let Some(name) = self.name.as_deref().filter(|name| !name.is_empty()) {
            items.push(("name".to_string(), name.to_string()));
        }
        if let Some(status) = self.status {
            items.push(("status".to_string(), status.as_query_value().to_string()));
        }
        if let Some(gender) = self.gender {
            items.push(("gender".to_string(), gender.as_query_value().to_string()));
        }
        items
    }
}

/// Read access to the character catalog
///
/// Every call takes the token that owns it; cancelling the token aborts the
/// request (including pending backoff) with `ApiError::Cancelled`.
#[async_trait]
pub trait CharacterApi: Send + Sync {
    async fn list_characters(
        &self,
        query: &CharacterQuery,
        cancel: &CancellationToken,
    ) -> Result<CharactersPage>;

    async fn get_character(&self, id: u32, cancel: &CancellationToken) -> Result<Character>;

    async fn get_location(&self, id: u32, cancel: &CancellationToken) -> Result<Location>;

    async fn get_episode(&self, id: u32, cancel: &CancellationToken) -> Result<Episode>;
}

/// [`CharacterApi`] over HTTP
pub struct RickAndMortyClient {
    builder: RequestBuilder,
    transport: RetryingTransport,
}

impl RickAndMortyClient {
    /// Client for the public API with the default retry policy
    pub fn new(http_client: Arc<dyn HttpClient>) -> Result<Self> {
        let builder = RequestBuilder::new(DEFAULT_BASE_URL)?;
        Ok(Self::with_parts(
            builder,
            RetryingTransport::new(http_client, RetryPolicy::default()),
        ))
    }

    pub fn with_parts(builder: RequestBuilder, transport: RetryingTransport) -> Self {
        Self { builder, transport }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let request = self.builder.build(&endpoint)?;
        let response = self.transport.send(request, cancel).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Received response"
        );
        decode_response(&response)
    }
}

#[async_trait]
impl CharacterApi for RickAndMortyClient {
    #[instrument(skip(self, cancel))]
    async fn list_characters(
        &self,
        query: &CharacterQuery,
        cancel: &CancellationToken,
    ) -> Result<CharactersPage> {
        let endpoint = Endpoint::get("character").with_query_items(query.query_items());
        let page: CharactersPage = self.fetch(endpoint, cancel).await?;
        debug!(
            results = page.results.len(),
            total = page.info.count,
            "Listed characters"
        );
        Ok(page)
    }

    #[instrument(skip(self, cancel))]
    async fn get_character(&self, id: u32, cancel: &CancellationToken) -> Result<Character> {
        self.fetch(Endpoint::get(format!("character/{id}")), cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    async fn get_location(&self, id: u32, cancel: &CancellationToken) -> Result<Location> {
        self.fetch(Endpoint::get(format!("location/{id}")), cancel)
            .await
    }

    #[instrument(skip(self, cancel))]
    async fn get_episode(&self, id: u32, cancel: &CancellationToken) -> Result<Episode> {
        self.fetch(Endpoint::get(format!("episode/{id}")), cancel)
            .await
    }
}
