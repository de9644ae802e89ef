//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` (single attempt, classified failures)
//! - `FavoritesStore` as a JSON file under the platform data directory
//! - `FavoritesStore` in memory, for tests and previews
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{JsonFavoritesStore, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = ReqwestHttpClient::new()?;
//!     let favorites = JsonFavoritesStore::in_data_dir();
//!
//!     // Use in core configuration
//!     Ok(())
//! }
//! ```

mod favorites;
mod http;

pub use favorites::{JsonFavoritesStore, MemoryFavoritesStore};
pub use http::{ReqwestHttpClient, DEFAULT_TIMEOUT};
