/*!
 * Blocking Backends
 *
 * Platform wrappers for "block while this word holds this value" and
 * "wake threads blocked on this word". Exactly one implementation is
 * compiled in, selected by target and cargo features:
 * - `futex`: raw futex(2) syscall (Linux, no features forced)
 * - `parking`: parking_lot_core keyed on the word address (other
 *   platforms, or the `force-parking` feature)
 * - `spin`: no blocking at all (the `force-spin` feature)
 *
 * Wake calls are best-effort: a failed wake is at most a missed wake,
 * which waiters absorb by re-checking in a loop.
 */

/// Outcome of a single blocking attempt.
///
/// Compact, internal-only; the public API never surfaces these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockOutcome {
    /// Woken up, or the word no longer held the expected value when the
    /// backend went to block. Caller re-checks; may be spurious.
    Woken,
    /// Interrupted (e.g. by a signal). Caller re-checks.
    Interrupted,
    /// The backend cannot block on this platform. Caller must stop
    /// blocking and fall back to polling.
    Unsupported,
}

#[cfg(feature = "force-spin")]
mod spin;
#[cfg(feature = "force-spin")]
pub(crate) use spin::{block, wake_all, wake_one};

#[cfg(all(
    not(feature = "force-spin"),
    any(feature = "force-parking", not(target_os = "linux"))
))]
mod parking;
#[cfg(all(
    not(feature = "force-spin"),
    any(feature = "force-parking", not(target_os = "linux"))
))]
pub(crate) use parking::{block, wake_all, wake_one};

#[cfg(all(
    not(feature = "force-spin"),
    not(feature = "force-parking"),
    target_os = "linux"
))]
mod futex;
#[cfg(all(
    not(feature = "force-spin"),
    not(feature = "force-parking"),
    target_os = "linux"
))]
pub(crate) use futex::{block, wake_all, wake_one};
