#![forbid(unsafe_code)]

//! Platform-aware primitives for the ekran playback crates.
//!
//! The playback controller runs natively (tests, desktop shells) and inside
//! a browser page on `wasm32`, and the two targets disagree about blocking
//! and about `Send`.
//!
//! # Synchronization
//!
//! On native targets, re-exports [`parking_lot`] types directly.
//!
//! On `wasm32`, provides a wrapper that uses `try_lock()` + spin loop
//! instead of blocking `lock()`. `Atomics.wait()` is forbidden on the
//! browser main thread, which is exactly where element callbacks arrive.
//!
//! # Conditional trait bounds
//!
//! [`MaybeSend`] and [`MaybeSync`] equal `Send`/`Sync` on native and are
//! blanket-implemented for all types on `wasm32`. The media traits use them
//! so that browser element handles (which are `!Send`) can implement the
//! same trait definitions the native test doubles do.
//!
//! # Async utilities
//!
//! [`time::sleep`] delegates to `tokio::time::sleep` on native; see the
//! module docs for the wasm32 behavior.

mod bounds;
pub mod time;

pub use bounds::{MaybeSend, MaybeSync};

// On native: re-export parking_lot types directly (zero overhead).
#[cfg(not(target_arch = "wasm32"))]
mod native {
    pub use parking_lot::{Mutex, MutexGuard};
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;

// On wasm32: wrapper type using try_lock + spin loop.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
