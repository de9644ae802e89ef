//! Async runtime abstraction for the catalog core.
//!
//! Every core crate spawns tasks, sleeps and cancels through this crate
//! instead of reaching for tokio directly, so the executor can be swapped
//! for hosts that drive their own event loop.
//!
//! # Modules
//!
//! - `task`: Task spawning and join handles
//! - `time`: Sleep and cancellable delays
//! - `sync`: Locks, channels and cancellation tokens
//! - `runtime`: Runtime handle lookup and blocking entry point
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::CancellationToken;
//! use core_async::time::{sleep_or_cancel, Duration};
//!
//! async fn debounce(token: &CancellationToken) -> bool {
//!     // false when the token fired before the delay elapsed
//!     sleep_or_cancel(Duration::from_millis(150), token).await
//! }
//! ```

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

pub use task::spawn;
pub use time::{sleep, Duration, Instant};
