/*!
 * Spin Backend
 *
 * The "blocking unsupported" tier: no way to park a thread, so `block`
 * spins briefly on the word with hardware hints and then reports
 * `Unsupported`, handing control back to the caller's re-check loop.
 * Wakes are no-ops; the value change alone releases spinners.
 */

use super::BlockOutcome;
use std::sync::atomic::{AtomicU32, Ordering};

/// Bounded tight-spin before giving up. Short waits resolve here; long
/// waits degrade to the caller's yield-and-recheck loop.
const SPIN_LIMIT: u32 = 100;

pub(crate) fn block(word: &AtomicU32, expected: u32) -> BlockOutcome {
    for _ in 0..SPIN_LIMIT {
        if word.load(Ordering::Acquire) != expected {
            return BlockOutcome::Woken;
        }
        std::hint::spin_loop();
    }
    BlockOutcome::Unsupported
}

pub(crate) fn wake_one(_word: &AtomicU32) {}

pub(crate) fn wake_all(_word: &AtomicU32) {}
