use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// A spin-based mutex with an RAII guard.
///
/// The bridge has exactly one hardware transaction slot, so a single
/// busy-wait lock is the whole concurrency story: every transaction runs
/// under this mutex, and the guard releases it on every exit path,
/// including early error returns.
///
/// The critical section is non-reentrant. A context that can preempt the
/// lock holder (an interrupt handler, for instance) must not take the same
/// lock, or both contexts deadlock; callers on bare metal keep such
/// handlers off this path or mask around the acquisition.
pub struct SpinMutex<T> {
    /// `true` while a guard exists.
    held: AtomicBool,
    value: UnsafeCell<T>,
}

// Safety: the lock hands out at most one guard at a time, so sharing the
// mutex only requires the value itself to be sendable across threads.
unsafe impl<T: Send> Sync for SpinMutex<T> {}
unsafe impl<T: Send> Send for SpinMutex<T> {}

impl<T> SpinMutex<T> {
    pub const fn new(value: T) -> Self {
        Self {
            held: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Spins until the lock is acquired, then returns the guard.
    ///
    /// Contended waiters spin on a plain load and only retry the atomic
    /// swap once the lock looks free (TATAS).
    #[inline]
    pub fn lock(&self) -> SpinMutexGuard<'_, T> {
        while self.held.swap(true, Ordering::Acquire) {
            while self.held.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
        SpinMutexGuard { mutex: self }
    }

    /// Attempts the lock once without spinning.
    #[inline]
    pub fn try_lock(&self) -> Option<SpinMutexGuard<'_, T>> {
        if self.held.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(SpinMutexGuard { mutex: self })
        }
    }

    /// Direct access through `&mut self`; no locking needed.
    #[inline]
    pub const fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consumes the mutex and returns the protected value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

pub struct SpinMutexGuard<'a, T> {
    mutex: &'a SpinMutex<T>,
}

impl<T> Deref for SpinMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: holding the guard means exclusive access.
        unsafe { &*self.mutex.value.get() }
    }
}

impl<T> DerefMut for SpinMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: holding the guard means exclusive access.
        unsafe { &mut *self.mutex.value.get() }
    }
}

impl<T> Drop for SpinMutexGuard<'_, T> {
    fn drop(&mut self) {
        // Release publishes the critical section to the next holder.
        self.mutex.held.store(false, Ordering::Release);
    }
}
