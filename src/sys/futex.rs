/*!
 * Futex Backend
 *
 * Direct futex(2) syscalls on the handshake word. FUTEX_PRIVATE_FLAG is
 * always set: the word lives inside a single process, never in shared
 * memory, so the kernel can skip the cross-process hash lookup.
 */

use super::BlockOutcome;
use std::sync::atomic::AtomicU32;

/// Block while `word` holds `expected`.
///
/// The kernel re-reads the word after queueing the waiter, so a wake that
/// raced this call is never lost: if the value already differs, the
/// syscall refuses to block and returns EAGAIN.
pub(crate) fn block(word: &AtomicU32, expected: u32) -> BlockOutcome {
    let rc = unsafe {
        libc::syscall(
            libc::SYS_futex,
            word as *const AtomicU32,
            libc::FUTEX_WAIT | libc::FUTEX_PRIVATE_FLAG,
            expected,
            std::ptr::null::<libc::timespec>(),
        )
    };
    if rc == 0 {
        return BlockOutcome::Woken;
    }
    match std::io::Error::last_os_error().raw_os_error() {
        // Value already differed when the kernel checked
        Some(libc::EAGAIN) => BlockOutcome::Woken,
        Some(libc::EINTR) => BlockOutcome::Interrupted,
        _ => BlockOutcome::Unsupported,
    }
}

/// Wake one thread blocked on `word`. Best-effort; errors ignored.
pub(crate) fn wake_one(word: &AtomicU32) {
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word as *const AtomicU32,
            libc::FUTEX_WAKE | libc::FUTEX_PRIVATE_FLAG,
            1i32,
        );
    }
}

/// Wake every thread blocked on `word`. Best-effort; errors ignored.
pub(crate) fn wake_all(word: &AtomicU32) {
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word as *const AtomicU32,
            libc::FUTEX_WAKE | libc::FUTEX_PRIVATE_FLAG,
            i32::MAX,
        );
    }
}
