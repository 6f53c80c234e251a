//! Region location: mapping a value to the raw memory span that backs it.
//!
//! A [`Region`] is the contiguous `[start, start + len)` span a value's own
//! storage occupies. For growable buffers the span covers the full
//! *capacity*, not the current length — unused trailing capacity is exactly
//! what decommit exists to reclaim. Values that own no safely locatable
//! storage report an empty region and the pipeline turns that into a zero
//! result.

use core::mem;

use crate::marker::PointerFree;

/// A borrowed span of raw memory, `[start, start + len)`.
///
/// Transient by contract: it is only valid while the `&mut` borrow it was
/// derived from is live, and must never be stored past the decommit call
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    start: usize,
    len: usize,
}

impl Region {
    pub(crate) const EMPTY: Self = Self { start: 0, len: 0 };

    /// Span of a single addressable value.
    #[inline]
    pub fn of_value<T: PointerFree>(value: &mut T) -> Self {
        Self {
            start: value as *mut T as usize,
            len: mem::size_of::<T>(),
        }
    }

    /// Span of a slice's elements (length, since a bare slice exposes no
    /// capacity).
    #[inline]
    pub fn of_slice<T: PointerFree>(slice: &mut [T]) -> Self {
        Self {
            start: slice.as_mut_ptr() as usize,
            len: mem::size_of::<T>() * slice.len(),
        }
    }

    #[inline]
    pub fn start(self) -> usize {
        self.start
    }

    #[inline]
    pub fn len(self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(start: usize, len: usize) -> Self {
        Self { start, len }
    }
}

/// Types whose backing storage can be located for decommit.
///
/// `region` takes `&mut self`: whoever asks for the span must hold exclusive
/// access to the value, because the span's contents are unspecified once it
/// has been decommitted.
///
/// Maps, strings, channels, and function values have no impl. Their backing
/// storage is either interleaved with allocator or runtime metadata, or
/// shaped in ways this crate cannot see, so they are deliberately not
/// decommittable.
///
/// # Safety
///
/// `region` must return a span that lies entirely within storage owned by,
/// and exclusively borrowed through, `self` — pointer-free per the
/// [`PointerFree`] contract — for as long as the `&mut self` borrow lives.
/// A `Region` is `Copy` and carries no lifetime, so the type system cannot
/// stop an impl from returning a span remembered from some earlier borrow;
/// an impl that does so hands the pipeline an address the allocator may
/// have reused, and the OS will zero whatever lives there now. That is why
/// the trait is `unsafe` and a safe impl does not compile:
///
/// ```compile_fail
/// use decommit::{Decommittable, Region};
///
/// struct Stale(Region);
///
/// impl Decommittable for Stale {
///     fn region(&mut self) -> Region {
///         self.0
///     }
/// }
/// ```
pub unsafe trait Decommittable {
    /// The contiguous raw span backing this value, or an empty region if
    /// the value owns no decommittable storage.
    fn region(&mut self) -> Region;
}

macro_rules! decommittable_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            // SAFETY: the region is the value's own storage, borrowed
            // through `self`.
            unsafe impl Decommittable for $ty {
                #[inline]
                fn region(&mut self) -> Region {
                    Region::of_value(self)
                }
            }
        )+
    };
}

decommittable_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, (),
);

// SAFETY: the region is the array's own storage, borrowed through `self`.
unsafe impl<T: PointerFree, const N: usize> Decommittable for [T; N] {
    #[inline]
    fn region(&mut self) -> Region {
        Region::of_slice(self)
    }
}

// SAFETY: the region is the slice's own elements, borrowed through `self`.
unsafe impl<T: PointerFree> Decommittable for [T] {
    #[inline]
    fn region(&mut self) -> Region {
        Region::of_slice(self)
    }
}

// SAFETY: the region is the vec's own allocation, held exclusively through
// `self` for the duration of the borrow.
unsafe impl<T: PointerFree> Decommittable for Vec<T> {
    /// The vec's full capacity, not just its initialized length.
    ///
    /// Clobbering the initialized prefix is fine: `T: PointerFree`
    /// guarantees every bit pattern the OS leaves behind is a valid `T`.
    fn region(&mut self) -> Region {
        if self.capacity() == 0 {
            // A capacity-zero vec holds a dangling sentinel pointer, not an
            // allocation.
            return Region::EMPTY;
        }
        Region {
            start: self.as_mut_ptr() as usize,
            len: self.capacity() * mem::size_of::<T>(),
        }
    }
}

// Each impl below peels exactly one layer of indirection and delegates to
// the target. Recursion depth is bounded by the nesting of the type itself,
// and a dangling layer is unrepresentable behind a live `&mut`.

// SAFETY: delegates to the target, which stays exclusively borrowed through
// the outer layer for the same extent.
unsafe impl<T: Decommittable + ?Sized> Decommittable for Box<T> {
    #[inline]
    fn region(&mut self) -> Region {
        (**self).region()
    }
}

// SAFETY: as for `Box` — the target's borrow is threaded through the
// reference.
unsafe impl<T: Decommittable + ?Sized> Decommittable for &mut T {
    #[inline]
    fn region(&mut self) -> Region {
        (**self).region()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_region_covers_own_storage() {
        let mut x = 0u64;
        let region = Region::of_value(&mut x);
        assert_eq!(region.start(), &raw mut x as usize);
        assert_eq!(region.len(), 8);
    }

    #[test]
    fn test_slice_region_covers_all_elements() {
        let mut buf = [0u32; 100];
        let region = buf.as_mut_slice().region();
        assert_eq!(region.start(), buf.as_mut_ptr() as usize);
        assert_eq!(region.len(), 400);
    }

    #[test]
    fn test_vec_region_covers_capacity_not_length() {
        let mut v: Vec<u64> = Vec::with_capacity(1000);
        v.push(1);
        v.push(2);
        let cap = v.capacity();
        let region = v.region();
        assert_eq!(region.len(), cap * 8);
        assert_eq!(region.start(), v.as_mut_ptr() as usize);
    }

    #[test]
    fn test_empty_vec_region_is_empty() {
        let mut v: Vec<u8> = Vec::new();
        assert!(v.region().is_empty());
    }

    #[test]
    fn test_indirection_peels_to_target() {
        let mut boxed: Box<[u16; 64]> = Box::new([0; 64]);
        let expected = Region::of_slice(boxed.as_mut_slice());
        assert_eq!(boxed.region(), expected);

        let mut nested: Box<Box<[u16; 64]>> = Box::new(Box::new([7; 64]));
        let inner = Region::of_slice(nested.as_mut_slice());
        assert_eq!(nested.region(), inner);

        let mut arr = [0u8; 32];
        let direct = Region::of_slice(arr.as_mut_slice());
        let mut level1 = &mut arr;
        let mut level2 = &mut level1;
        assert_eq!(level2.region(), direct);
    }

    #[test]
    fn test_array_region_matches_value_region() {
        let mut arr = [0u64; 8];
        assert_eq!(arr.region(), Region::of_value(&mut arr));
    }
}
