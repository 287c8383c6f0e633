//! Spinlock for sharing one debug context process-wide.
//!
//! This only serializes access. Callers still must not re-enter the lock
//! from an interrupt handler that fires while the main context holds it.

use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU32, Ordering};

// Lock states as u32 so targets without byte atomics still get a plain
// word-sized swap.
const UNLOCKED: u32 = 0;
const LOCKED: u32 = 1;

/// A mutual exclusion primitive based on spinning.
///
/// # Example
///
/// ```
/// use debug_utils::Spinlock;
///
/// static COUNTER: Spinlock<u64> = Spinlock::new(0);
///
/// let mut guard = COUNTER.lock();
/// *guard += 1;
/// ```
pub struct Spinlock<T> {
    locked: AtomicU32,
    data: UnsafeCell<T>,
}

// Safety: Spinlock provides synchronized access to T
unsafe impl<T: Send> Sync for Spinlock<T> {}
unsafe impl<T: Send> Send for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub const fn new(data: T) -> Self {
        Self {
            locked: AtomicU32::new(UNLOCKED),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquire the lock, spinning until available.
    #[inline]
    pub fn lock(&self) -> SpinlockGuard<'_, T> {
        loop {
            if let Some(guard) = self.try_lock() {
                return guard;
            }
            while self.locked.load(Ordering::Relaxed) == LOCKED {
                spin_loop();
            }
        }
    }

    /// Acquire the lock if it is free right now.
    #[inline]
    pub fn try_lock(&self) -> Option<SpinlockGuard<'_, T>> {
        if self.locked.swap(LOCKED, Ordering::Acquire) == UNLOCKED {
            Some(SpinlockGuard {
                lock: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// RAII guard; the lock is released on drop.
pub struct SpinlockGuard<'a, T> {
    lock: &'a Spinlock<T>,
    // The lock must be released where it was taken, and `&guard` hands out `&T`
    _not_send: PhantomData<*const ()>,
}

// Safety: sharing the guard only shares `&T`
unsafe impl<T: Sync> Sync for SpinlockGuard<'_, T> {}

impl<T> Deref for SpinlockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the guard holds the lock
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinlockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the guard holds the lock exclusively
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SpinlockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(UNLOCKED, Ordering::Release);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinlock_basic() {
        let lock = Spinlock::new(42);
        {
            let mut guard = lock.lock();
            assert_eq!(*guard, 42);
            *guard = 100;
        }
        {
            let guard = lock.lock();
            assert_eq!(*guard, 100);
        }
    }

    #[test]
    fn test_spinlock_try_lock() {
        let lock = Spinlock::new(0);

        let guard = lock.try_lock();
        assert!(guard.is_some());

        // Held: a second attempt fails instead of spinning forever
        assert!(lock.try_lock().is_none());
        drop(guard);

        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn test_guard_sync_follows_data() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<SpinlockGuard<'static, u32>>();

        // Resolves only when the guard type is not Sync: with Sync both
        // impls apply and the call is ambiguous.
        trait AmbiguousIfSync<A> {
            fn check() {}
        }
        impl<T: ?Sized> AmbiguousIfSync<()> for T {}
        struct SyncMarker;
        impl<T: ?Sized + Sync> AmbiguousIfSync<SyncMarker> for T {}
        <SpinlockGuard<'static, core::cell::Cell<u32>> as AmbiguousIfSync<_>>::check();
    }

    #[test]
    fn test_into_inner() {
        let lock = Spinlock::new(7);
        *lock.lock() += 1;
        assert_eq!(lock.into_inner(), 8);
    }
}
