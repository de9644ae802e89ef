//! Synchronization primitives.
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::{watch, Mutex};
//!
//! async fn example() {
//!     let state = Mutex::new(0u32);
//!     let (tx, rx) = watch::channel(0u32);
//!
//!     let mut guard = state.lock().await;
//!     *guard += 1;
//!     tx.send_replace(*guard);
//!     assert_eq!(*rx.borrow(), 1);
//! }
//! ```

pub use tokio::sync::{watch, Mutex, RwLock};
pub use tokio_util::sync::{CancellationToken, DropGuard};
