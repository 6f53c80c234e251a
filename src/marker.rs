//! Compile-time pointer-safety classification.
//!
//! Decommitted pages lose their contents: the OS may refill them with zeros
//! or, on some platforms, leave them undefined. If those bytes held a live
//! pointer that something later follows, the program is off chasing garbage
//! addresses. Only types whose storage provably contains no indirection
//! anywhere may therefore be decommitted.
//!
//! Rather than classifying type structure at runtime, the property is a
//! marker trait checked structurally by the compiler: a type is
//! [`PointerFree`] only if every part of it is. Anything the compiler
//! cannot prove safe simply has no impl, which keeps the classification
//! conservative by construction.

/// Marker for types whose storage contains no pointers, references, handles,
/// or any other indirection, at any nesting depth.
///
/// Implemented for the fixed-width integers, floats, `()`, arrays and tuples
/// of `PointerFree` types, and structs defined through [`pointer_free!`].
///
/// References, raw pointers, `Box`, `Vec`, `String`, maps, channels, and
/// function pointers deliberately have no impl: their storage *is* an
/// indirection, or points at memory whose shape is unknown here.
///
/// `bool` and `char` also have no impl. They are indirection-free, but a
/// decommitted page may come back holding arbitrary bytes on some platforms,
/// and those types have bit patterns that are not valid values.
///
/// # Safety
///
/// Implementors must guarantee both of the following for every value of the
/// type:
///
/// - no part of its storage is a pointer, reference, or handle that the
///   language or allocator must keep valid;
/// - every possible bit pattern of its storage is a valid value, so that
///   whatever the OS leaves in a decommitted page cannot break the type's
///   validity invariants.
///
/// [`pointer_free!`]: crate::pointer_free
pub unsafe trait PointerFree {}

macro_rules! pointer_free_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            // SAFETY: flat scalar storage, no indirection, every bit
            // pattern is a valid value.
            unsafe impl PointerFree for $ty {}
        )+
    };
}

pointer_free_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, (),
);

// SAFETY: an array is pointer-free exactly when its element type is.
unsafe impl<T: PointerFree, const N: usize> PointerFree for [T; N] {}

macro_rules! pointer_free_tuple {
    ($($name:ident)+) => {
        // SAFETY: a tuple of pointer-free fields adds no storage of its own.
        unsafe impl<$($name: PointerFree),+> PointerFree for ($($name,)+) {}
    };
}

pointer_free_tuple!(A);
pointer_free_tuple!(A B);
pointer_free_tuple!(A B C);
pointer_free_tuple!(A B C D);
pointer_free_tuple!(A B C D E);
pointer_free_tuple!(A B C D E F);
pointer_free_tuple!(A B C D E F G);
pointer_free_tuple!(A B C D E F G H);

/// Define a struct and mark it [`PointerFree`] and
/// [`Decommittable`](crate::Decommittable).
///
/// The macro re-emits the struct definition unchanged and derives both
/// impls, after checking at compile time that every field type is itself
/// `PointerFree`. A field that can hold indirection makes the whole
/// definition fail to compile, which is the entire point:
///
/// ```
/// decommit::pointer_free! {
///     /// A reusable scratch buffer.
///     pub struct Scratch {
///         len: u32,
///         data: [u8; 4096],
///     }
/// }
/// ```
///
/// ```compile_fail
/// decommit::pointer_free! {
///     struct Bad {
///         data: *const u8,
///     }
/// }
/// ```
///
/// ```compile_fail
/// decommit::pointer_free! {
///     struct AlsoBad {
///         name: String,
///     }
/// }
/// ```
///
/// Only non-generic structs with named fields are supported; for anything
/// else, write the `unsafe impl` by hand and uphold the trait's contract
/// yourself.
#[macro_export]
macro_rules! pointer_free {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$fmeta])* $fvis $field: $fty,)*
        }

        const _: () = {
            #[allow(dead_code)]
            fn all_fields_pointer_free() {
                fn check<T: $crate::PointerFree>() {}
                $(check::<$fty>();)*
            }
        };

        // SAFETY: every field type is checked above to be `PointerFree`,
        // and the struct adds no storage beyond its fields and padding.
        unsafe impl $crate::PointerFree for $name {}

        // SAFETY: the region is the struct's own storage, borrowed through
        // `self`.
        unsafe impl $crate::Decommittable for $name {
            #[inline]
            fn region(&mut self) -> $crate::Region {
                $crate::Region::of_value(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn require_pointer_free<T: PointerFree>() {}

    #[test]
    fn test_scalars_and_composites_are_pointer_free() {
        require_pointer_free::<u8>();
        require_pointer_free::<i64>();
        require_pointer_free::<f64>();
        require_pointer_free::<usize>();
        require_pointer_free::<[u32; 16]>();
        require_pointer_free::<[[u8; 8]; 8]>();
        require_pointer_free::<(u8, u64, f32)>();
    }

    #[test]
    fn test_macro_defined_struct_is_pointer_free() {
        crate::pointer_free! {
            struct Header {
                magic: u64,
                len: u32,
                crc: u32,
                payload: [u8; 64],
            }
        }

        require_pointer_free::<Header>();

        let mut h = Header {
            magic: 0,
            len: 0,
            crc: 0,
            payload: [0; 64],
        };
        let region = crate::Decommittable::region(&mut h);
        assert_eq!(region.len(), core::mem::size_of::<Header>());
        assert_eq!(region.start(), &raw mut h as usize);
    }
}
