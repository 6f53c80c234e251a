//! Windows adapter: `DiscardVirtualMemory`, resolved lazily from kernel32.
//!
//! The function only exists on Windows 8.1 / Server 2012 R2 and later, so
//! it is looked up with `GetProcAddress` on first use and the result cached.
//! Older systems degrade to reporting zero released bytes.

use core::ffi::c_void;
use std::sync::OnceLock;

use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleA, GetProcAddress};
use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

type DiscardVirtualMemoryFn = unsafe extern "system" fn(*mut c_void, usize) -> u32;

static DISCARD: OnceLock<Option<DiscardVirtualMemoryFn>> = OnceLock::new();

fn discard_fn() -> Option<DiscardVirtualMemoryFn> {
    *DISCARD.get_or_init(|| {
        // SAFETY: kernel32 is always loaded in a Win32 process and the
        // lookup strings are NUL-terminated.
        let module = unsafe { GetModuleHandleA(c"kernel32.dll".as_ptr().cast()) };
        if module.is_null() {
            return None;
        }
        // SAFETY: `module` is a live module handle.
        let proc = unsafe { GetProcAddress(module, c"DiscardVirtualMemory".as_ptr().cast()) }?;
        // SAFETY: DiscardVirtualMemory has this exact signature on every
        // Windows version that exports it.
        Some(unsafe {
            core::mem::transmute::<unsafe extern "system" fn() -> isize, DiscardVirtualMemoryFn>(
                proc,
            )
        })
    })
}

pub(crate) fn query_page_size() -> usize {
    // SAFETY: GetSystemInfo fills the whole struct and cannot fail.
    let info = unsafe {
        let mut info = core::mem::zeroed::<SYSTEM_INFO>();
        GetSystemInfo(&mut info);
        info
    };
    info.dwPageSize as usize
}

/// Discard the physical pages backing `[start, start + len)`.
///
/// Returns `len` when the call succeeds, 0 when `DiscardVirtualMemory` is
/// unavailable or reports any error. The call either discards the whole
/// range or nothing.
///
/// # Safety
///
/// The range must be page-aligned, committed, and exclusively borrowed by
/// the caller for the duration of the call; its contents are undefined
/// afterwards.
pub(crate) unsafe fn os_decommit(start: usize, len: usize) -> usize {
    let Some(discard) = discard_fn() else {
        return 0;
    };
    // SAFETY: upheld by the caller.
    let ret = unsafe { discard(start as *mut c_void, len) };
    if ret != 0 { 0 } else { len }
}
