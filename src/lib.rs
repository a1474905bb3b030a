/*!
 * waitcell
 *
 * Blocking wait/notify for a single atomic integer cell.
 *
 * A [`WaitCell`] wraps an integral value and lets threads block until the
 * value changes: a waiter calls `wait(old)`, a notifier stores a new value
 * and calls `notify_one`/`notify_all`. The blocking itself is handled by a
 * [`WaitCounter`] handshake word driven by one of three backends selected
 * at compile time:
 * - Futex syscall (Linux, fastest)
 * - parking_lot_core user-space parking (cross-platform)
 * - Pure spin-polling (forced via the `force-spin` feature)
 *
 * # Architecture
 *
 * The payload and the wake-signal word are separate: the backend blocks on
 * a dedicated 32-bit counter, so the payload type never constrains the
 * syscall. Every notify bumps the counter before issuing the wake, which
 * is what keeps a concurrently-parking waiter from missing the signal.
 *
 * # Usage
 *
 * The required protocol is store-then-notify; a notify with no preceding
 * store wakes waiters only long enough for them to re-check and park again.
 */

mod cell;
mod config;
mod counter;
mod sys;
mod waitable;

pub use cell::WaitCell;
pub use config::BackendKind;
pub use counter::WaitCounter;
pub use waitable::{Waitable, WaitableInt};
