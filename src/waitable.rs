/*!
 * Waitable Payload Types
 *
 * Sealed mapping from integral payload types to their std atomic
 * counterparts, so [`WaitCell`](crate::WaitCell) can stay generic without
 * constraining the representation the blocking backend operates on.
 */

use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

mod sealed {
    pub trait Sealed {}
}

/// A trivially-copyable integral type that can live inside a
/// [`WaitCell`](crate::WaitCell).
///
/// Implemented for `bool` and all fixed-width and pointer-sized integers.
/// Sealed: the forwarding functions mirror the std atomic API exactly and
/// external implementations would have no atomic to forward to.
pub trait Waitable: sealed::Sealed + Copy + PartialEq + Send + Sync + 'static {
    /// The std atomic type holding this payload.
    type Atomic: Send + Sync;

    fn into_atomic(self) -> Self::Atomic;
    fn load(atomic: &Self::Atomic, order: Ordering) -> Self;
    fn store(atomic: &Self::Atomic, value: Self, order: Ordering);
    fn swap(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
    fn compare_exchange(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
    fn compare_exchange_weak(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

/// Integer payloads additionally support wrapping arithmetic.
pub trait WaitableInt: Waitable {
    fn fetch_add(atomic: &Self::Atomic, delta: Self, order: Ordering) -> Self;
    fn fetch_sub(atomic: &Self::Atomic, delta: Self, order: Ordering) -> Self;
}

macro_rules! impl_waitable {
    ($($ty:ty => $atomic:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Waitable for $ty {
            type Atomic = $atomic;

            #[inline]
            fn into_atomic(self) -> $atomic {
                <$atomic>::new(self)
            }

            #[inline]
            fn load(atomic: &$atomic, order: Ordering) -> $ty {
                atomic.load(order)
            }

            #[inline]
            fn store(atomic: &$atomic, value: $ty, order: Ordering) {
                atomic.store(value, order);
            }

            #[inline]
            fn swap(atomic: &$atomic, value: $ty, order: Ordering) -> $ty {
                atomic.swap(value, order)
            }

            #[inline]
            fn compare_exchange(
                atomic: &$atomic,
                current: $ty,
                new: $ty,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$ty, $ty> {
                atomic.compare_exchange(current, new, success, failure)
            }

            #[inline]
            fn compare_exchange_weak(
                atomic: &$atomic,
                current: $ty,
                new: $ty,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$ty, $ty> {
                atomic.compare_exchange_weak(current, new, success, failure)
            }
        }
    )*};
}

macro_rules! impl_waitable_int {
    ($($ty:ty),* $(,)?) => {$(
        impl WaitableInt for $ty {
            #[inline]
            fn fetch_add(atomic: &Self::Atomic, delta: $ty, order: Ordering) -> $ty {
                atomic.fetch_add(delta, order)
            }

            #[inline]
            fn fetch_sub(atomic: &Self::Atomic, delta: $ty, order: Ordering) -> $ty {
                atomic.fetch_sub(delta, order)
            }
        }
    )*};
}

impl_waitable!(
    bool => AtomicBool,
    u8 => AtomicU8,
    u16 => AtomicU16,
    u32 => AtomicU32,
    u64 => AtomicU64,
    usize => AtomicUsize,
    i8 => AtomicI8,
    i16 => AtomicI16,
    i32 => AtomicI32,
    i64 => AtomicI64,
    isize => AtomicIsize,
);

impl_waitable_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding_roundtrip() {
        let atomic = 7u64.into_atomic();
        assert_eq!(u64::load(&atomic, Ordering::SeqCst), 7);
        u64::store(&atomic, 9, Ordering::SeqCst);
        assert_eq!(u64::swap(&atomic, 11, Ordering::SeqCst), 9);
        assert_eq!(
            u64::compare_exchange(&atomic, 11, 13, Ordering::SeqCst, Ordering::SeqCst),
            Ok(11)
        );
        assert_eq!(u64::fetch_add(&atomic, 2, Ordering::SeqCst), 13);
        assert_eq!(u64::fetch_sub(&atomic, 1, Ordering::SeqCst), 15);
    }

    #[test]
    fn test_bool_payload() {
        let atomic = false.into_atomic();
        assert!(!bool::load(&atomic, Ordering::SeqCst));
        bool::store(&atomic, true, Ordering::SeqCst);
        assert!(bool::load(&atomic, Ordering::SeqCst));
    }
}
