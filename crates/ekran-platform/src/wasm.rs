//! wasm32 lock wrapper.
//!
//! `parking_lot::Mutex::lock()` may fall back to `Atomics.wait()`, which
//! panics on the browser main thread. Controller critical sections are a
//! few field updates long and the browser build is effectively
//! single-threaded, so `try_lock()` + spin is safe here.

use core::hint;

/// Mutex that spins instead of blocking.
pub struct Mutex<T: ?Sized>(parking_lot::Mutex<T>);

/// Guard type matching the native re-export.
pub type MutexGuard<'a, T> = parking_lot::MutexGuard<'a, T>;

impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self(parking_lot::Mutex::new(value))
    }
}

impl<T: ?Sized> Mutex<T> {
    /// Acquire the lock, spinning until it is available.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        loop {
            if let Some(guard) = self.0.try_lock() {
                return guard;
            }
            hint::spin_loop();
        }
    }

    /// Attempt to acquire the lock without spinning.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.0.try_lock()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
