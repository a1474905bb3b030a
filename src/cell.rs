/*!
 * Wait Cell
 *
 * Atomic value wrapper with wait/notify. The payload is an ordinary std
 * atomic; a dedicated [`WaitCounter`] carries the park/wake handshake, so
 * the payload's width never constrains the blocking backend.
 *
 * # Protocol
 *
 * Store-then-notify: the payload store and the notify are two separate
 * operations the notifier must sequence itself. A notify with no
 * preceding store wakes waiters only long enough to re-check and park
 * again.
 */

use crate::counter::WaitCounter;
use crate::waitable::{Waitable, WaitableInt};
use std::fmt;
use std::sync::atomic::Ordering;
use std::thread;

/// An atomic integral value threads can block on until it changes.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::Ordering;
/// use std::sync::Arc;
/// use std::thread;
/// use waitcell::WaitCell;
///
/// let cell = Arc::new(WaitCell::new(0u32));
/// let waiter = {
///     let cell = Arc::clone(&cell);
///     thread::spawn(move || {
///         cell.wait(0);
///         cell.load(Ordering::SeqCst)
///     })
/// };
///
/// cell.store(7, Ordering::SeqCst);
/// cell.notify_all();
/// assert_eq!(waiter.join().unwrap(), 7);
/// ```
pub struct WaitCell<T: Waitable> {
    value: T::Atomic,
    signal: WaitCounter,
}

impl<T: Waitable> WaitCell<T> {
    /// Create a cell holding `initial`, with a fresh handshake counter.
    pub fn new(initial: T) -> Self {
        Self {
            value: initial.into_atomic(),
            signal: WaitCounter::new(),
        }
    }

    /// Atomic read of the payload.
    #[inline]
    pub fn load(&self, order: Ordering) -> T {
        T::load(&self.value, order)
    }

    /// Atomic write of the payload. Does not wake waiters on its own;
    /// follow with [`notify_one`](Self::notify_one) or
    /// [`notify_all`](Self::notify_all).
    #[inline]
    pub fn store(&self, value: T, order: Ordering) {
        T::store(&self.value, value, order);
    }

    /// Atomic swap, returning the previous payload.
    #[inline]
    pub fn swap(&self, value: T, order: Ordering) -> T {
        T::swap(&self.value, value, order)
    }

    /// Standard compare-exchange on the payload.
    #[inline]
    pub fn compare_exchange(
        &self,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        T::compare_exchange(&self.value, current, new, success, failure)
    }

    /// Weak compare-exchange; may fail spuriously, for use in loops.
    #[inline]
    pub fn compare_exchange_weak(
        &self,
        current: T,
        new: T,
        success: Ordering,
        failure: Ordering,
    ) -> Result<T, T> {
        T::compare_exchange_weak(&self.value, current, new, success, failure)
    }

    /// Block until the payload differs from `old`, with seq-cst loads.
    ///
    /// Returns immediately if the payload already differs. May block
    /// indefinitely if no notify ever arrives and the value never
    /// changes; there is no timeout or cancellation.
    #[inline]
    pub fn wait(&self, old: T) {
        self.wait_with(old, Ordering::SeqCst);
    }

    /// Block until the payload differs from `old`, loading with `order`.
    pub fn wait_with(&self, old: T, order: Ordering) {
        loop {
            // Snapshot the handshake word before the payload check: a
            // notify landing after the check then bumps the word past
            // the snapshot, and the backend refuses to block on it.
            let seq = self.signal.load(Ordering::Acquire);
            if T::load(&self.value, order) != old {
                return;
            }
            if !self.signal.wait_while_eq(seq) {
                // Blocking unavailable; degrade to polling
                thread::yield_now();
            }
        }
    }

    /// Block until the payload satisfies `pred`, returning that payload.
    ///
    /// The predicate is checked before each park, so a condition that
    /// already holds never blocks.
    pub fn wait_until<F>(&self, mut pred: F) -> T
    where
        F: FnMut(T) -> bool,
    {
        loop {
            let current = self.load(Ordering::SeqCst);
            if pred(current) {
                return current;
            }
            self.wait(current);
        }
    }

    /// Wake one waiter. Safe with zero, one, or many waiters parked.
    #[inline]
    pub fn notify_one(&self) {
        self.signal.notify_one();
    }

    /// Wake all waiters. Safe with zero, one, or many waiters parked.
    #[inline]
    pub fn notify_all(&self) {
        self.signal.notify_all();
    }
}

impl<T: WaitableInt> WaitCell<T> {
    /// Atomic wrapping add on the payload, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, delta: T, order: Ordering) -> T {
        T::fetch_add(&self.value, delta, order)
    }

    /// Atomic wrapping subtract on the payload, returning the previous
    /// value.
    #[inline]
    pub fn fetch_sub(&self, delta: T, order: Ordering) -> T {
        T::fetch_sub(&self.value, delta, order)
    }
}

impl<T: Waitable + Default> Default for WaitCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Waitable> From<T> for WaitCell<T> {
    fn from(initial: T) -> Self {
        Self::new(initial)
    }
}

impl<T: Waitable + fmt::Debug> fmt::Debug for WaitCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitCell")
            .field("value", &self.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
