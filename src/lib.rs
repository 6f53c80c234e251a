//! decommit: return the physical memory backing a buffer to the OS while
//! keeping its virtual allocation intact.
//!
//! Long-lived buffers and pools often hold far more capacity than they are
//! currently using. Freeing and reallocating them churns the allocator;
//! leaving them alone pins physical memory. Decommitting is the middle
//! ground: the pages behind the buffer are handed back to the OS
//! (`madvise(MADV_DONTNEED)` on Unix, `DiscardVirtualMemory` on Windows),
//! the process RSS drops, and the buffer stays allocated and usable — its
//! contents are simply unspecified until written again (commonly zero on
//! next touch).
//!
//! Everything is best-effort: the return value is the number of bytes the
//! OS confirmed released, and `0` means "nothing released" whether the
//! input was smaller than a page, the platform lacks the facility, or the
//! OS declined. No entry point panics or returns an error.
//!
//! # Usage
//!
//! ```
//! let mut buf = vec![0u8; 1 << 20];
//! // ... fill and drain the buffer ...
//! buf.clear();
//! let released = decommit::decommit_bytes(&mut buf);
//! assert!(released <= buf.capacity());
//! assert_eq!(buf.capacity(), 1 << 20); // allocation untouched
//! ```
//!
//! Only types that provably contain no pointers may be decommitted; the
//! [`PointerFree`] marker trait and the [`pointer_free!`] macro enforce
//! this at compile time.

mod decommit;
mod marker;
mod page;
mod platform;
mod region;

pub use decommit::{decommit_bytes, decommit_slice, decommit_stack, decommit_value};
pub use marker::PointerFree;
pub use region::{Decommittable, Region};

/// The OS page granularity, in bytes.
///
/// Decommit requests are served in whole pages; anything smaller than this
/// can never release memory.
pub fn page_size() -> usize {
    page::page_size().size()
}
