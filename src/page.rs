//! Page-size discovery and page alignment arithmetic.
//!
//! The OS only reclaims physical memory in whole pages, so every decommit
//! request must first be shrunk to the largest fully page-aligned sub-range
//! it contains. This module is the single place where that granularity is
//! encoded; nothing above it may assume a particular page size or alignment.

use std::sync::OnceLock;

use crate::platform;

/// OS page granularity, discovered once per process.
///
/// When the page size is a power of two (every mainstream target), `mask`
/// holds `size - 1` and alignment uses bitmasks; otherwise `mask` is zero
/// and alignment falls back to integer division.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PageSize {
    size: usize,
    mask: usize,
}

/// A fully page-aligned sub-range `[start, end)` with `len = end - start`.
///
/// Both bounds are multiples of the page size and `start <= end` always
/// holds; a range that no full page fits into collapses to [`EMPTY`],
/// never to a negative length.
///
/// [`EMPTY`]: AlignedRange::EMPTY
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AlignedRange {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) len: usize,
}

impl AlignedRange {
    pub(crate) const EMPTY: Self = Self {
        start: 0,
        end: 0,
        len: 0,
    };
}

static PAGE_SIZE: OnceLock<PageSize> = OnceLock::new();

/// The process-wide page size, queried from the OS on first use and
/// immutable afterwards.
pub(crate) fn page_size() -> PageSize {
    *PAGE_SIZE.get_or_init(|| PageSize::new(platform::query_page_size()))
}

impl PageSize {
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size > 0);
        let mask = if size.is_power_of_two() { size - 1 } else { 0 };
        Self { size, mask }
    }

    #[inline]
    pub(crate) fn size(self) -> usize {
        self.size
    }

    /// Largest fully page-aligned sub-range contained in `[start, end)`:
    /// `start` is rounded up and `end` rounded down to page boundaries.
    ///
    /// Sub-page and reversed inputs both collapse to the empty range, so
    /// callers may pass degenerate ranges without pre-checking.
    pub(crate) fn align(self, start: usize, end: usize) -> AlignedRange {
        let (astart, aend) = if self.mask != 0 {
            // Rounding up from the last page of the address space overflows;
            // no full page can start there, so the range is empty.
            let Some(up) = start.checked_add(self.mask) else {
                return AlignedRange::EMPTY;
            };
            (up & !self.mask, end & !self.mask)
        } else {
            let Some(up) = start.checked_add(self.size - 1) else {
                return AlignedRange::EMPTY;
            };
            (up / self.size * self.size, end / self.size * self.size)
        };
        if astart >= aend {
            return AlignedRange::EMPTY;
        }
        AlignedRange {
            start: astart,
            end: aend,
            len: aend - astart,
        }
    }
}
