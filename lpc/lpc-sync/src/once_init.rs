use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU8, Ordering};

const EMPTY: u8 = 0;
const WRITING: u8 = 1;
const READY: u8 = 2;

/// A write-once publication cell.
///
/// Startup code stores a value exactly once; every later reader observes
/// it fully initialized. Unlike a `get_or_init` cell, readers never race
/// to construct the value — before the single `set`, `get` simply reports
/// that nothing has been published yet.
pub struct OnceInit<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

// Safety: the value is written by exactly one `set` and only shared after
// the READY release store.
unsafe impl<T: Sync> Sync for OnceInit<T> {}
unsafe impl<T: Send> Send for OnceInit<T> {}

impl<T> OnceInit<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Publishes `value` if nothing has been published yet.
    ///
    /// # Errors
    ///
    /// Returns the value back if the cell is already set (or a concurrent
    /// `set` is in flight); the first writer wins.
    pub fn set(&self, value: T) -> Result<(), T> {
        if self
            .state
            .compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(value);
        }
        // Safety: the EMPTY -> WRITING transition makes us the sole writer.
        unsafe {
            (*self.value.get()).write(value);
        }
        self.state.store(READY, Ordering::Release);
        Ok(())
    }

    /// Returns the published value, or `None` before the first `set`.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self.state.load(Ordering::Acquire) {
            READY => {
                // Safety: READY is only stored after the value is written.
                Some(unsafe { (*self.value.get()).assume_init_ref() })
            }
            WRITING => {
                // A writer is mid-publication; wait it out rather than
                // reporting an empty cell that is about to be full.
                while self.state.load(Ordering::Acquire) != READY {
                    spin_loop();
                }
                // Safety: READY reached above.
                Some(unsafe { (*self.value.get()).assume_init_ref() })
            }
            _ => None,
        }
    }
}

impl<T> Default for OnceInit<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OnceInit<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == READY {
            // Safety: READY means the value was initialized and is owned here.
            unsafe { (*self.value.get()).assume_init_drop() }
        }
    }
}
