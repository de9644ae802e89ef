//! # Host Bridge Traits
//!
//! Capability contracts the catalog core needs from the host platform.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Single-shot async HTTP transport
//! - [`FavoritesStore`](favorites::FavoritesStore) - Id-keyed favorites persistence
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//! | iOS      | host adapter (URLSession, Core Data) |
//! | Android  | host adapter (OkHttp, Room) |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Adapters must map
//! "no response at all" failures to `Network`/`Timeout` so the core can tell
//! them apart from HTTP status failures when deciding whether to retry.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`; the core shares them across tasks
//! behind `Arc`.

pub mod error;
pub mod favorites;
pub mod http;
pub mod logging;

pub use error::BridgeError;

pub use favorites::{FavoriteRecord, FavoritesStore};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
