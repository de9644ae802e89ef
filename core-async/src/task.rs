//! Task spawning.

pub use tokio::join;
pub use tokio::task::JoinHandle;

/// Spawn a future onto the current runtime.
///
/// Panics when called outside a runtime, same as `tokio::spawn`.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}
