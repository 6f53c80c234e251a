//! The decommit pipeline: region → aligned range → platform adapter.
//!
//! Every public entry point funnels through [`decommit_region`], which
//! applies the sub-page cutoff, shrinks the request to page granularity,
//! and hands the result to a [`Backend`]. Production code always uses the
//! zero-sized [`OsBackend`]; unit tests inject recording backends so the
//! alignment contract can be checked without ever issuing a real advisory.

use crate::marker::PointerFree;
use crate::page;
use crate::platform;
use crate::region::{Decommittable, Region};

/// Sink for aligned decommit requests.
///
/// Implementations receive only page-aligned `(start, len)` pairs with
/// `len > 0`, and must report either exactly `len` or 0 — the OS calls
/// being wrapped are all-or-nothing, so partial credit is never reported.
pub(crate) trait Backend {
    fn decommit(&self, start: usize, len: usize) -> usize;
}

/// Forwards aligned requests to the platform adapter.
pub(crate) struct OsBackend;

impl Backend for OsBackend {
    #[inline]
    fn decommit(&self, start: usize, len: usize) -> usize {
        // SAFETY: `decommit_region` only produces page-aligned sub-ranges of
        // a region derived from a live `&mut` borrow, so the range is mapped
        // and exclusively held for the duration of the call.
        unsafe { platform::os_decommit(start, len) }
    }
}

/// Shrink `region` to page granularity and ask `backend` to discard it.
///
/// Regions smaller than one page return 0 without reaching the backend:
/// they can never contain a full page, so there is nothing to ask for.
pub(crate) fn decommit_region<B: Backend>(region: Region, backend: &B) -> usize {
    let page = page::page_size();
    if region.len() < page.size() {
        return 0;
    }
    let end = region.start().saturating_add(region.len());
    let aligned = page.align(region.start(), end);
    if aligned.len == 0 {
        return 0;
    }
    backend.decommit(aligned.start, aligned.len)
}

/// Ask the OS to release the physical memory backing `buf`'s full capacity.
///
/// The vec's length, capacity, and virtual allocation are untouched; only
/// the physical pages behind it are handed back, so the process RSS drops
/// while the buffer stays usable. Contents are unspecified afterwards
/// (commonly zero on next touch).
///
/// The whole capacity is targeted, not just the initialized prefix: a long
/// vec that was truncated keeps its backing pages until they are either
/// touched again or decommitted here.
///
/// Returns the number of bytes the OS confirmed released. `0` covers every
/// way of not releasing anything: a capacity under one page, a platform
/// without the facility, or the OS declining — none of which is an error
/// worth distinguishing for a best-effort hint.
pub fn decommit_bytes(buf: &mut Vec<u8>) -> usize {
    decommit_value(buf)
}

/// Ask the OS to release the physical memory backing `value`'s storage.
///
/// Works for any [`Decommittable`] value: arrays, slices, vecs of
/// [`PointerFree`] elements, structs defined via [`pointer_free!`], and any
/// number of `Box`/`&mut` layers around those. The `&mut` borrow pins the
/// storage for the duration of the call.
///
/// Returns the number of bytes released, `0` if the value's region spans
/// less than one page or the OS declines.
///
/// [`pointer_free!`]: crate::pointer_free
pub fn decommit_value<T: Decommittable + ?Sized>(value: &mut T) -> usize {
    decommit_region(value.region(), &OsBackend)
}

/// Ask the OS to release the physical memory backing a slice's elements.
///
/// Unlike [`decommit_bytes`] this sees only the slice's length; if the
/// slice is a view into a larger buffer, the rest of that buffer is left
/// alone.
pub fn decommit_slice<T: PointerFree>(buf: &mut [T]) -> usize {
    decommit_region(Region::of_slice(buf), &OsBackend)
}

/// Decommit the unused portion of the calling thread's stack.
///
/// Currently a no-op that always returns 0: no supported platform exposes a
/// safe way to locate and discard the unused stack extent. The entry point
/// exists so call sites can adopt it unconditionally and start benefiting
/// if a platform gains support.
pub fn decommit_stack() -> usize {
    0
}
