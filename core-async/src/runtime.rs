//! Runtime handles for code that may run outside an async context.

pub use tokio::runtime::Handle;

/// Drive `future` to completion on a throwaway current-thread runtime.
///
/// Must not be called from inside a runtime; check [`Handle::try_current`]
/// first and spawn onto the existing runtime instead.
pub fn block_on<F: std::future::Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
