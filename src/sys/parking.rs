/*!
 * Parking Backend
 *
 * Cross-platform fallback using parking_lot_core, keyed on the address
 * of the handshake word. The validate callback re-reads the word under
 * the parking lot's internal bucket lock, giving the same atomicity
 * guarantee as FUTEX_WAIT: a wake that landed between the caller's check
 * and the park makes validation fail, and the thread never sleeps.
 */

use super::BlockOutcome;
use parking_lot_core::{park, unpark_all, unpark_one, ParkResult, ParkToken, UnparkToken};
use std::sync::atomic::{AtomicU32, Ordering};

/// Block while `word` holds `expected`.
pub(crate) fn block(word: &AtomicU32, expected: u32) -> BlockOutcome {
    let addr = word as *const AtomicU32 as usize;
    let result = unsafe {
        park(
            addr,
            || word.load(Ordering::Acquire) == expected,
            || {},
            |_key, _was_last| {},
            ParkToken(0),
            None,
        )
    };
    match result {
        ParkResult::Unparked(_) => BlockOutcome::Woken,
        // Validation failed: the word changed before we slept
        ParkResult::Invalid => BlockOutcome::Woken,
        // No deadline was supplied; treated as a spurious wake if it
        // ever surfaces
        ParkResult::TimedOut => BlockOutcome::Interrupted,
    }
}

/// Wake one thread parked on `word`.
pub(crate) fn wake_one(word: &AtomicU32) {
    let addr = word as *const AtomicU32 as usize;
    unsafe {
        unpark_one(addr, |_| UnparkToken(0));
    }
}

/// Wake every thread parked on `word`.
pub(crate) fn wake_all(word: &AtomicU32) {
    let addr = word as *const AtomicU32 as usize;
    unsafe {
        unpark_all(addr, UnparkToken(0));
    }
}
