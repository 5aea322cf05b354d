//! Conditional `Send`/`Sync` bounds.
//!
//! Browser element and engine handles are `!Send` (they wrap JS objects),
//! while the native side spawns tokio tasks that require `Send` futures.
//! These marker traits let one trait definition serve both targets.
//!
//! Note: marker supertraits disappear at the `dyn` boundary on wasm32, so
//! a `Box<dyn Trait>` whose trait requires `MaybeSend` is only `Send` on
//! native targets.

/// `Send` on native targets, no-op bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

/// `Send` on native targets, no-op bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}

#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

/// `Sync` on native targets, no-op bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync> MaybeSync for T {}

/// `Sync` on native targets, no-op bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}

#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}
