//! Unix adapter: `madvise(MADV_DONTNEED)`.

use core::ffi::c_void;

pub(crate) fn query_page_size() -> usize {
    // SAFETY: sysconf reads a process constant and has no preconditions.
    let n = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    // sysconf only fails for names the libc does not know; _SC_PAGESIZE is
    // universal, so the fallback is near-unreachable. If it ever fires on a
    // larger-page system, an undersized guess stays harmless: advisories on
    // sub-page-aligned ranges are rejected by the kernel and the adapter
    // reports zero, per its contract.
    if n > 0 { n as usize } else { 4096 }
}

/// Advise the kernel that `[start, start + len)` is not needed.
///
/// On anonymous private mappings the kernel drops the backing pages and
/// zero-fills on next touch. The advisory covers the whole range or fails
/// outright, so the report is `len` or 0 with nothing in between.
///
/// # Safety
///
/// The range must be page-aligned, mapped, and exclusively borrowed by the
/// caller for the duration of the call; its contents are unspecified
/// afterwards.
pub(crate) unsafe fn os_decommit(start: usize, len: usize) -> usize {
    // The advisory is known-unreliable on 64-bit PowerPC; report zero
    // instead of guessing.
    if cfg!(target_arch = "powerpc64") {
        return 0;
    }
    // SAFETY: upheld by the caller.
    let ret = unsafe { libc::madvise(start as *mut c_void, len, libc::MADV_DONTNEED) };
    if ret != 0 { 0 } else { len }
}
