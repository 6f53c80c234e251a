//! OS platform adapters for decommit and page-size discovery.
//!
//! One adapter per target family, selected at compile time:
//! - Unix: `madvise(MADV_DONTNEED)`
//! - Windows: `DiscardVirtualMemory`, resolved lazily from kernel32
//! - Miri: an inert shim so the pointer and alignment logic runs under Miri
//!
//! Each adapter exposes the same two functions:
//!
//! - `query_page_size() -> usize` — the OS page granularity, read once at
//!   startup by the page module.
//! - `unsafe os_decommit(start, len) -> usize` — discard the physical pages
//!   backing the page-aligned range `[start, start + len)`, reporting the
//!   full `len` on success and 0 on any failure or missing facility. The
//!   underlying calls are all-or-nothing, so nothing in between is ever
//!   reported. The virtual mapping is untouched either way.
//!
//! There is no catch-all fallback arm: a target without an adapter fails to
//! compile, forcing an explicit port instead of silently releasing nothing.

cfg_if::cfg_if! {
    if #[cfg(miri)] {
        mod miri;
        pub(crate) use miri::{os_decommit, query_page_size};
    } else if #[cfg(windows)] {
        mod windows;
        pub(crate) use windows::{os_decommit, query_page_size};
    } else if #[cfg(unix)] {
        mod unix;
        pub(crate) use unix::{os_decommit, query_page_size};
    }
}
