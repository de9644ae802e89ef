//! # Character API Client
//!
//! Typed access to the Rick and Morty REST API on top of the host's
//! [`HttpClient`](bridge_traits::http::HttpClient).
//!
//! ## Components
//!
//! - **Request Builder** (`endpoint`): Joins base URL, path and query into an `HttpRequest`
//! - **Retrying Transport** (`transport`): Rate-limit aware retry with exponential backoff
//! - **Decoder** (`decode`): Status validation and JSON decoding
//! - **Client** (`client`): The [`CharacterApi`] trait and its HTTP implementation
//! - **Types** (`types`): Characters, locations, episodes and pagination metadata
//!
//! ## Example
//!
//! ```ignore
//! let client = RickAndMortyClient::new(http_client)?;
//! let page = client
//!     .list_characters(&CharacterQuery::page(1), &CancellationToken::new())
//!     .await?;
//! ```

pub mod client;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{CharacterApi, CharacterQuery, RickAndMortyClient, DEFAULT_BASE_URL};
pub use decode::{decode, decode_response, validate};
pub use endpoint::{Endpoint, RequestBuilder, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ApiError, Result};
pub use transport::RetryingTransport;
pub use types::{
    Character, CharactersPage, Episode, Gender, Location, LocationRef, Page, PageInfo, Status,
};
