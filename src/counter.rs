/*!
 * Wait Counter
 *
 * The OS-backed blocking primitive: a single 32-bit word threads can
 * park on, plus wake operations that force a visible value change before
 * signalling. Zero allocation, stable address, owned by exactly one
 * enclosing cell.
 *
 * # Design: Increment Before Wake
 *
 * `notify_one`/`notify_all` bump the word (AcqRel) before issuing the
 * wake. A waiter that sampled the word and is about to park therefore
 * either observes the new value and refuses to block (the backend
 * re-checks atomically), or is already parked and receives the wake.
 * This is the no-lost-wakeup invariant everything above relies on.
 */

use crate::sys::{self, BlockOutcome};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use tracing::warn;

/// Logged once per process when the backend reports it cannot block.
static DEGRADED: AtomicBool = AtomicBool::new(false);

/// A 32-bit word threads can block on until its value changes.
///
/// The word changes only through the notify-path increment; user payload
/// lives elsewhere (see [`WaitCell`](crate::WaitCell)).
#[derive(Debug)]
pub struct WaitCounter {
    word: AtomicU32,
}

impl WaitCounter {
    /// New counter with the word at zero.
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// Atomic read of the word.
    #[inline]
    pub fn load(&self, order: Ordering) -> u32 {
        self.word.load(order)
    }

    /// Atomic add on the word, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, delta: u32, order: Ordering) -> u32 {
        self.word.fetch_add(delta, order)
    }

    /// Block until the word differs from the value observed at entry.
    ///
    /// Returns `true` once the word has changed. Returns `false` only if
    /// the backend cannot block at all; callers must treat that as
    /// "assume already woken" and re-check their own condition.
    pub fn wait(&self) -> bool {
        let observed = self.word.load(Ordering::Acquire);
        self.wait_while_eq(observed)
    }

    /// Block while the word still equals `observed`.
    ///
    /// Taking the snapshot as an argument lets callers order it before
    /// their own condition check, which closes the window where a notify
    /// lands between that check and the park.
    pub fn wait_while_eq(&self, observed: u32) -> bool {
        while self.word.load(Ordering::Acquire) == observed {
            match sys::block(&self.word, observed) {
                BlockOutcome::Woken | BlockOutcome::Interrupted => {
                    // Possibly spurious; give the notifier a chance to
                    // finish before re-checking
                    thread::yield_now();
                }
                BlockOutcome::Unsupported => {
                    if !DEGRADED.swap(true, Ordering::Relaxed) {
                        warn!("blocking backend unavailable, degrading to spin-polling");
                    }
                    return false;
                }
            }
        }
        true
    }

    /// Wake one thread blocked on this counter.
    ///
    /// Increments the word first so a concurrently-parking waiter cannot
    /// miss the signal. Never fails observably; wake errors are at most
    /// a missed wake, absorbed by the waiter's re-check loop.
    #[inline]
    pub fn notify_one(&self) {
        self.word.fetch_add(1, Ordering::AcqRel);
        sys::wake_one(&self.word);
    }

    /// Wake every thread blocked on this counter.
    #[inline]
    pub fn notify_all(&self) {
        self.word.fetch_add(1, Ordering::AcqRel);
        sys::wake_all(&self.word);
    }
}

impl Default for WaitCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_notify_without_waiters() {
        let counter = WaitCounter::new();
        counter.notify_one();
        counter.notify_all();
        counter.notify_all();
        // Each notify bumped the word exactly once
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_wait_returns_after_notify() {
        let counter = Arc::new(WaitCounter::new());
        let counter_clone = counter.clone();

        let handle = thread::spawn(move || counter_clone.wait());

        // Give thread time to park
        thread::sleep(Duration::from_millis(50));
        counter.notify_one();

        // true unless the platform cannot block at all
        let woken = handle.join().unwrap();
        if crate::BackendKind::current() != crate::BackendKind::Spin {
            assert!(woken);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wait_while_eq_stale_snapshot() {
        let counter = WaitCounter::new();
        counter.notify_one();
        // Snapshot predates the increment, so this must not block
        assert!(counter.wait_while_eq(0));
    }

    #[test]
    fn test_fetch_add_previous_value() {
        let counter = WaitCounter::new();
        assert_eq!(counter.fetch_add(5, Ordering::SeqCst), 0);
        assert_eq!(counter.fetch_add(1, Ordering::SeqCst), 5);
        assert_eq!(counter.load(Ordering::SeqCst), 6);
    }
}
