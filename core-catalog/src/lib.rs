//! # Character Catalog
//!
//! Stateful controllers the UI layer drives and observes.
//!
//! ## Components
//!
//! - **List Controller** (`list`): Pagination, debounced search and filters over the character list
//! - **Detail Controller** (`detail`): Favorite toggle and related characters for one character
//! - **Favorites Controller** (`favorites`): Sorted view over the favorites store
//! - **Cursor** (`cursor`): Page number extraction from `next`/`prev` URLs
//!
//! Every controller publishes its state on a `watch` channel; `snapshot()`
//! reads the latest value and `subscribe()` follows changes.

pub mod cursor;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod list;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::extract_page_number;
pub use detail::{CharacterDetailController, DetailSnapshot, RelatedConfig};
pub use error::{CatalogError, Result};
pub use favorites::{FavoriteCharacter, FavoritesController, FavoritesSnapshot};
pub use filter::CharacterFilter;
pub use list::{CharacterListController, ListConfig, DEFAULT_SEARCH_DEBOUNCE};
pub use state::{ListSnapshot, LoadState};
