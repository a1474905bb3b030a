/*!
 * Backend Configuration
 *
 * Compile-time capability switch between the blocking backends. The
 * selection is a build-time constant resolved once from the target and
 * cargo features, never a runtime branch.
 */

/// Blocking backend compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Raw futex(2) syscall (Linux only, fastest)
    Futex,
    /// parking_lot_core user-space parking (cross-platform)
    Parking,
    /// Pure spin-polling, no thread ever sleeps (`force-spin` feature)
    Spin,
}

impl BackendKind {
    /// The backend this build was compiled with.
    pub const fn current() -> Self {
        #[cfg(feature = "force-spin")]
        {
            BackendKind::Spin
        }
        #[cfg(all(
            not(feature = "force-spin"),
            any(feature = "force-parking", not(target_os = "linux"))
        ))]
        {
            BackendKind::Parking
        }
        #[cfg(all(
            not(feature = "force-spin"),
            not(feature = "force-parking"),
            target_os = "linux"
        ))]
        {
            BackendKind::Futex
        }
    }

    /// Backend name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Futex => "futex",
            BackendKind::Parking => "parking",
            BackendKind::Spin => "spin",
        }
    }
}
