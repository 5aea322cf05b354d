//! Platform-aware async time utilities.
//!
//! On native: delegates to [`tokio::time::sleep`].
//! On wasm32: parks forever. Browser shells schedule the controls-hide
//! delay through host timers, and `gloo_timers` is `Rc`-based / `!Send`,
//! so an armed delay task simply waits for cancellation there.

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::sleep;

/// Never-resolving sleep for wasm32.
///
/// A delay that fired immediately would be worse than one that never fires:
/// the caller's timeout action would run with no delay at all. Hosts on
/// wasm32 drive timeouts themselves and cancel the pending task.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(_duration: std::time::Duration) {
    std::future::pending::<()>().await;
}
